use anyhow::Result;
use chrono_tz::Tz;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

use super::message::build_message;
use super::JobAlarm;
use crate::config::AlarmConfig;
use crate::model::{JobInfo, JobLog};
use crate::transport::{HttpTransport, WebhookReply, WebhookTransport};
use crate::utils::format_duration;

pub const WEBHOOK_PREFIX: &str = "https://qyapi.weixin.qq.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoJob,
    NoRecipients,
    NoWebhook,
}

/// What happened to one alarm. Only `Failed` is reported as a failure to the dispatcher.
#[derive(Debug)]
pub enum Delivery {
    Skipped(SkipReason),
    Sent(WebhookReply),
    Failed(anyhow::Error),
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        !matches!(self, Delivery::Failed(_))
    }
}

/// Posts job alarms to a WeCom group robot found in the job's recipient list.
pub struct WeixinJobAlarm {
    transport: Arc<dyn WebhookTransport>,
    timezone: Tz,
}

impl WeixinJobAlarm {
    pub fn new(transport: Arc<dyn WebhookTransport>, timezone: Tz) -> Self {
        Self {
            transport,
            timezone,
        }
    }

    pub fn from_config(config: &AlarmConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.connect_timeout)?;
        Ok(Self::new(Arc::new(transport), config.timezone))
    }

    pub fn deliver(&self, job: Option<&JobInfo>, log: &JobLog) -> Delivery {
        let Some(job) = job else {
            debug!("QWX job alarm skipped: no job");
            return Delivery::Skipped(SkipReason::NoJob);
        };

        let receivers = match job.alarm_email.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => {
                debug!("QWX job alarm skipped: job = {} has no recipients", job.id);
                return Delivery::Skipped(SkipReason::NoRecipients);
            }
        };

        let Some(url) = select_webhook(receivers) else {
            debug!("QWX job alarm skipped: job = {} has no webhook recipient", job.id);
            return Delivery::Skipped(SkipReason::NoWebhook);
        };

        let message = build_message(job, log, self.timezone);
        let start = Instant::now();
        let result = serde_json::to_string(&message)
            .map_err(anyhow::Error::from)
            .and_then(|body| self.transport.post_json(url, body));

        match result {
            Ok(reply) => {
                info!(
                    "QWX job alarm send result: job = {}, log = {}, status = {}, body = {} ({})",
                    job.id,
                    log.id,
                    reply.status,
                    reply.body,
                    format_duration(start.elapsed())
                );
                Delivery::Sent(reply)
            }
            Err(e) => {
                error!(
                    "QWX job alarm send failed: job = {}, log = {}, error = {:#}",
                    job.id, log.id, e
                );
                Delivery::Failed(e)
            }
        }
    }
}

impl JobAlarm for WeixinJobAlarm {
    fn do_alarm(&self, job: Option<&JobInfo>, log: &JobLog) -> bool {
        self.deliver(job, log).is_delivered()
    }
}

/// First recipient that points at the robot webhook service, in list order.
pub fn select_webhook(receivers: &str) -> Option<&str> {
    receivers
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .find(|token| token.starts_with(WEBHOOK_PREFIX))
}
