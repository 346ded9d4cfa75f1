use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "/var/log/qwx-alarm.log";
pub const SYSLOG_PROCESS: &str = "qwx-alarm";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    #[default]
    Stdout,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "syslog")]
    Syslog,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub output: LogOutput,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            output: LogOutput::Stdout,
            file: None,
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// Case insensitive, "off" silences the alarm log entirely.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level.trim().parse::<LevelFilter>().map_err(|_| {
            anyhow!(
                "Invalid log level '{}'. Must be one of: off, error, warn, info, debug, trace",
                self.level
            )
        })
    }

    /// Target of the `file` output, falling back to the system log directory.
    pub fn log_file(&self) -> &Path {
        self.file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE))
    }
}
