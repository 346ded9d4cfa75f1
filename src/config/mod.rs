pub mod file;
pub mod logging;
pub mod timeunit;
pub mod validation;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use nom::character::complete::{digit1, multispace0, space0};
use nom::combinator::{all_consuming, map_res};
use nom::error::ParseError;
use nom::sequence::{delimited, separated_pair};
use nom::{AsChar, IResult, InputTakeAtPosition, Parser};
use std::time::Duration;

use self::file::{AlarmDefinition, ConfigFile};
use self::logging::LoggingConfig;
use self::timeunit::TimeUnit;
use crate::model::{JobInfo, JobLog};
use crate::transport::DEFAULT_CONNECT_TIMEOUT;

#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub alarm: AlarmConfig,
    pub job: Option<JobInfo>,
    pub log: Option<JobLog>,
}

#[derive(Debug, Clone)]
pub struct AlarmConfig {
    pub connect_timeout: Duration,
    pub timezone: Tz,
}

pub fn parse_config_file(file: &ConfigFile) -> Result<Config> {
    let alarm = match &file.alarm {
        Some(definition) => AlarmConfig::parse(definition).context("Malformed 'alarm' section")?,
        None => AlarmConfig::parse(&AlarmDefinition::default())?,
    };

    Ok(Config {
        logging: file.logging.clone().unwrap_or_default(),
        alarm,
        job: file.job.clone(),
        log: file.log.clone(),
    })
}

impl AlarmConfig {
    fn parse(definition: &AlarmDefinition) -> Result<Self> {
        let connect_timeout = match &definition.connect_timeout {
            Some(timeout) => parse_duration(timeout).context("Malformed field: connect_timeout")?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };

        let timezone = match &definition.timezone {
            Some(name) => parse_timezone(name)?,
            None => system_timezone()?,
        };

        Ok(Self {
            connect_timeout,
            timezone,
        })
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("Unable to parse timezone '{}': {}", name, e))
}

fn system_timezone() -> Result<Tz> {
    let name = iana_time_zone::get_timezone().context("Unable to get system timezone")?;
    parse_timezone(&name)
}

/// Parses "<amount> <unit>", e.g. "10 s" or "1500ms".
pub fn parse_duration(input: &str) -> Result<Duration> {
    let amount_unit = separated_pair(number, space0, TimeUnit::parse);
    let result = all_consuming(ws(amount_unit))(input);

    let (amount, unit) = result.map_err(|e| anyhow!("Failed to parse: {}", e))?.1;
    Ok(unit.to_duration(amount))
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

pub fn ws<I, O, E: ParseError<I>, F>(inner: F) -> impl FnMut(I) -> IResult<I, O, E>
where
    F: Parser<I, O, E>,
    I: InputTakeAtPosition,
    <I as InputTakeAtPosition>::Item: AsChar + Clone,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::file::parse_config_str;
    use super::logging::LogOutput;
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("10 s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration(" 2 minute ").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));

        assert!(parse_duration("").is_err());
        assert!(parse_duration("ten s").is_err());
        assert!(parse_duration("10 parsecs").is_err());
        assert!(parse_duration("10").is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let file = parse_config_str(
            r#"
logging:
  output: file
  file: /tmp/qwx-alarm.log
  level: debug
alarm:
  connect_timeout: 3 s
  timezone: Asia/Shanghai
job:
  id: 12
  job_desc: report
  executor_handler: reportHandler
  author: wangwu
  alarm_email: "ops@example.com,https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc"
log:
  id: 34
  trigger_time: "2024-03-05T01:02:03.045Z"
  handle_msg: failed
"#,
        )
        .unwrap();
        let config = parse_config_file(&file).unwrap();

        assert_eq!(config.logging.output, LogOutput::File);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.alarm.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.alarm.timezone, chrono_tz::Asia::Shanghai);

        let job = config.job.unwrap();
        assert_eq!(job.id, 12);
        assert_eq!(job.author.as_deref(), Some("wangwu"));

        let log = config.log.unwrap();
        assert_eq!(log.id, 34);
        assert!(log.trigger_time.is_some());
    }

    #[test]
    fn test_defaults() {
        let file = parse_config_str("alarm:\n  timezone: UTC\n").unwrap();
        let config = parse_config_file(&file).unwrap();

        assert_eq!(config.logging.output, LogOutput::Stdout);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.alarm.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert!(config.job.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn test_bad_timezone() {
        let file = parse_config_str("alarm:\n  timezone: Mars/Olympus\n").unwrap();
        assert!(parse_config_file(&file).is_err());
    }
}
