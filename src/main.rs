use anyhow::bail;
use clap::Parser;
use log::{debug, info};

use qwx_alarm::alarm::{JobAlarm, WeixinJobAlarm};
use qwx_alarm::config::file::read_config_file;
use qwx_alarm::config::logging::LoggingConfig;
use qwx_alarm::config::parse_config_file;
use qwx_alarm::config::validation::check_config;
use qwx_alarm::logging;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: String,

    /// Print config validation result and exit without sending
    #[arg(long)]
    validate: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_file = read_config_file(&args.config)?;

    if args.validate {
        // The configured logger is itself under validation, report on stdout
        logging::setup_logging(&LoggingConfig::default())?;
        info!("Validating config file: {}", args.config);
        return check_config(&config_file);
    }

    let config = parse_config_file(&config_file)?;

    logging::setup_logging(&config.logging)?;

    info!("Starting qwx-alarm with config file: {}", args.config);

    debug!("Parsed config: {:?}", config);

    let (Some(job), Some(log)) = (&config.job, &config.log) else {
        info!("No job alarm defined in config, nothing to send");
        return Ok(());
    };

    let alarm = WeixinJobAlarm::from_config(&config.alarm)?;
    if !alarm.do_alarm(Some(job), log) {
        bail!("Alarm delivery failed for job {}", job.id);
    }

    info!("Exiting");
    Ok(())
}
