pub mod message;
pub mod weixin;

use crate::model::{JobInfo, JobLog};

pub use weixin::WeixinJobAlarm;

/// A delivery channel for job failure notifications.
///
/// `true` means the channel either delivered the alarm or had nothing to do for this job.
/// `false` means delivery was attempted and failed.
pub trait JobAlarm: Send + Sync {
    fn do_alarm(&self, job: Option<&JobInfo>, log: &JobLog) -> bool;
}
