use anyhow::Context;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::model::{JobInfo, JobLog};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub alarm: Option<AlarmDefinition>,
    #[serde(default)]
    pub job: Option<JobInfo>,
    #[serde(default)]
    pub log: Option<JobLog>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AlarmDefinition {
    /// e.g. "10 s", "1500ms"
    #[serde(default)]
    pub connect_timeout: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

pub fn read_config_file(path: &str) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path).context("Failed to read config file")?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> anyhow::Result<ConfigFile> {
    let config = serde_yml::from_str(content).context("Failed to parse config file")?;
    Ok(config)
}
