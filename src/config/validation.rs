use anyhow::{bail, Result};
use log::{error, info, warn};
use std::path::Path;
use std::time::Duration;

use crate::alarm::weixin::select_webhook;
use crate::config::file::ConfigFile;
use crate::config::logging::{LogOutput, DEFAULT_LOG_FILE};
use crate::config::{parse_duration, parse_timezone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Error(String),
    Warning(String),
}

fn validate_output_path(path: &Path) -> Option<String> {
    // If path exists, it must be a file
    if path.exists() && !path.is_file() {
        return Some(format!("Path '{}' exists but is not a file", path.display()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        match std::fs::metadata(parent) {
            Err(_) => {
                return Some(format!("Parent directory '{}' does not exist", parent.display()))
            }
            Ok(meta) if meta.permissions().readonly() => {
                return Some(format!("Parent directory '{}' is not writable", parent.display()))
            }
            Ok(_) => {}
        }
    }

    None
}

fn validate_logging_config(conf: &ConfigFile) -> Vec<ValidationResult> {
    let mut result = vec![];

    if let Some(logging) = &conf.logging {
        if let Err(e) = logging.level_filter() {
            result.push(ValidationResult::Error(e.to_string()));
        }

        if logging.output == LogOutput::File {
            if let Some(path) = &logging.file {
                if let Some(err) = validate_output_path(path) {
                    result.push(ValidationResult::Error(format!("Invalid log file: {}", err)));
                }
            } else {
                result.push(ValidationResult::Warning(format!(
                    "Log output is set to 'file' but no file path specified, using '{}'",
                    DEFAULT_LOG_FILE
                )));
            }
        }
    }

    result
}

fn validate_alarm_config(conf: &ConfigFile) -> Vec<ValidationResult> {
    let mut result = vec![];

    if let Some(alarm) = &conf.alarm {
        if let Some(tz_name) = &alarm.timezone {
            if let Err(e) = parse_timezone(tz_name) {
                result.push(ValidationResult::Error(e.to_string()));
            }
        }

        if let Some(timeout) = &alarm.connect_timeout {
            match parse_duration(timeout) {
                Err(e) => result.push(ValidationResult::Error(format!(
                    "Invalid 'connect_timeout' format: {}",
                    e
                ))),
                Ok(duration) if duration == Duration::ZERO => {
                    result.push(ValidationResult::Error(
                        "connect_timeout must be greater than zero".to_string(),
                    ))
                }
                Ok(_) => {}
            }
        }
    }

    result
}

fn validate_job(conf: &ConfigFile) -> Vec<ValidationResult> {
    let mut result = vec![];

    match (&conf.job, &conf.log) {
        (Some(_), None) => result.push(ValidationResult::Error(
            "'job' is defined without a 'log'".to_string(),
        )),
        (None, Some(_)) => result.push(ValidationResult::Error(
            "'log' is defined without a 'job'".to_string(),
        )),
        _ => {}
    }

    if let Some(job) = &conf.job {
        let receivers = job.alarm_email.as_deref().unwrap_or("");
        if select_webhook(receivers).is_none() {
            result.push(ValidationResult::Warning(format!(
                "Job {}: no webhook recipient in 'alarm_email', nothing will be sent",
                job.id
            )));
        }
        if job.author.as_deref().map_or(true, |a| a.trim().is_empty()) {
            result.push(ValidationResult::Warning(format!(
                "Job {}: no author, the alarm will mention @all",
                job.id
            )));
        }
    }

    result
}

pub fn validate_config(conf: &ConfigFile) -> Vec<ValidationResult> {
    let mut result = vec![];

    result.extend(validate_logging_config(conf));
    result.extend(validate_alarm_config(conf));
    result.extend(validate_job(conf));

    result
}

/// Logs every validation result and fails when any of them is an error.
///
/// Works on the raw file so that sections `parse_config_file` would reject are still reported.
pub fn check_config(conf: &ConfigFile) -> Result<()> {
    let results = validate_config(conf);

    let mut errors = 0;
    for msg in &results {
        match msg {
            ValidationResult::Error(m) => {
                error!("{}", m);
                errors += 1;
            }
            ValidationResult::Warning(m) => warn!("{}", m),
        }
    }

    if errors > 0 {
        bail!("Config file has {} error(s)", errors);
    }
    if results.is_empty() {
        info!("Config file is valid");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::parse_config_str;
    use crate::config::parse_config_file;

    fn errors(results: &[ValidationResult]) -> usize {
        results
            .iter()
            .filter(|r| matches!(r, ValidationResult::Error(_)))
            .count()
    }

    #[test]
    fn test_valid_config() {
        let conf = parse_config_str(
            r#"
alarm:
  connect_timeout: 10 s
  timezone: Asia/Shanghai
job:
  id: 1
  author: ops
  alarm_email: https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc
log:
  id: 2
"#,
        )
        .unwrap();

        assert!(validate_config(&conf).is_empty());
    }

    #[test]
    fn test_invalid_alarm_section() {
        let conf = parse_config_str(
            "alarm:\n  connect_timeout: soon\n  timezone: Nowhere/City\n",
        )
        .unwrap();

        assert_eq!(errors(&validate_config(&conf)), 2);
    }

    #[test]
    fn test_zero_timeout() {
        let conf = parse_config_str("alarm:\n  connect_timeout: 0 s\n").unwrap();
        assert_eq!(
            validate_config(&conf),
            vec![ValidationResult::Error(
                "connect_timeout must be greater than zero".to_string()
            )]
        );
    }

    #[test]
    fn test_logging() {
        let conf = parse_config_str("logging:\n  output: file\n  level: loud\n").unwrap();
        let results = validate_config(&conf);

        assert_eq!(errors(&results), 1);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_job_warnings() {
        let conf = parse_config_str(
            "job:\n  id: 3\n  alarm_email: ops@example.com\nlog:\n  id: 4\n",
        )
        .unwrap();
        let results = validate_config(&conf);

        assert_eq!(errors(&results), 0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_job_without_log() {
        let conf = parse_config_str(
            "job:\n  id: 3\n  author: ops\n  alarm_email: https://qyapi.weixin.qq.com/x\n",
        )
        .unwrap();

        assert_eq!(
            validate_config(&conf),
            vec![ValidationResult::Error(
                "'job' is defined without a 'log'".to_string()
            )]
        );
    }

    #[test]
    fn test_check_reports_what_parsing_rejects() {
        let conf = parse_config_str(
            "logging:\n  level: loud\nalarm:\n  timezone: Mars/Olympus\n  connect_timeout: soon\n",
        )
        .unwrap();
        assert!(parse_config_file(&conf).is_err());

        assert_eq!(errors(&validate_config(&conf)), 3);
        let err = check_config(&conf).unwrap_err();
        assert_eq!(err.to_string(), "Config file has 3 error(s)");
    }

    #[test]
    fn test_check_accepts_warnings() {
        let conf = parse_config_str("job:\n  id: 3\nlog:\n  id: 4\n").unwrap();
        assert!(check_config(&conf).is_ok());
    }
}
