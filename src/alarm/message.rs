use chrono_tz::Tz;
use serde::Serialize;

use crate::model::{JobInfo, JobLog};

pub const MENTION_ALL: &str = "@all";

const NULL_PLACEHOLDER: &str = "null";
const TRIGGER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Serialize)]
pub struct TextMessage {
    pub msgtype: &'static str,
    pub text: TextBody,
}

#[derive(Debug, Serialize)]
pub struct TextBody {
    pub content: String,
    pub mentioned_list: Vec<String>,
}

pub fn render_content(job: &JobInfo, log: &JobLog, timezone: Tz) -> String {
    let trigger_time = log
        .trigger_time
        .map(|t| t.with_timezone(&timezone).format(TRIGGER_TIME_FORMAT).to_string())
        .unwrap_or_else(|| NULL_PLACEHOLDER.to_string());
    let handle_msg = log.handle_msg.as_deref().unwrap_or(NULL_PLACEHOLDER);

    format!(
        "Scheduler Alarm : Executor Handler =  {}\n\
         \n\
         JobId : {}\n\
         JobDesc : {}\n\
         JobLogId: {}\n\
         TriggerTime : {}\n\
         HandleCode : {}\n\
         \n",
        job.executor_handler, job.id, job.job_desc, log.id, trigger_time, handle_msg
    )
}

/// The job author, or a broadcast mention when nobody owns the job.
pub fn mention(job: &JobInfo) -> String {
    match job.author.as_deref().map(str::trim) {
        Some(author) if !author.is_empty() => author.to_string(),
        _ => MENTION_ALL.to_string(),
    }
}

pub fn build_message(job: &JobInfo, log: &JobLog, timezone: Tz) -> TextMessage {
    TextMessage {
        msgtype: "text",
        text: TextBody {
            content: render_content(job, log, timezone),
            mentioned_list: vec![mention(job)],
        },
    }
}
