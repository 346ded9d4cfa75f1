use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job metadata handed over by the alarm dispatcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobInfo {
    pub id: i32,
    #[serde(default)]
    pub job_desc: String,
    #[serde(default)]
    pub executor_handler: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Comma separated recipients, shared by every alarm channel.
    /// Mixes email addresses and webhook urls.
    #[serde(default)]
    pub alarm_email: Option<String>,
}

/// Outcome of a single job execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobLog {
    pub id: i64,
    #[serde(default)]
    pub trigger_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub handle_msg: Option<String>,
}
