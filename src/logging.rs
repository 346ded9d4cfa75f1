use anyhow::{anyhow, Context, Result};
use crate::config::logging::{LogOutput, LoggingConfig, SYSLOG_PROCESS};
use std::fs::OpenOptions;

pub fn setup_logging(config: &LoggingConfig) -> Result<()> {
    let level = config.level_filter()?;

    match &config.output {
        LogOutput::Stdout => {
            env_logger::Builder::new()
                .filter_level(level)
                .format_timestamp_millis()
                .try_init()?;
        }
        LogOutput::File => {
            let path = config.log_file();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

            env_logger::Builder::new()
                .filter_level(level)
                .format_timestamp_millis()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .try_init()?;
        }
        LogOutput::Syslog => {
            let formatter = syslog::Formatter3164 {
                facility: syslog::Facility::LOG_USER,
                hostname: None,
                process: SYSLOG_PROCESS.into(),
                pid: std::process::id(),
            };

            let logger = syslog::unix(formatter)
                .map_err(|e| anyhow!("Failed to create syslog logger: {}", e))?;
            log::set_boxed_logger(Box::new(syslog::BasicLogger::new(logger)))
                .map(|()| log::set_max_level(level))?;
        }
    }

    Ok(())
}
