use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use console_engine::TransportSettings;
use log::LevelFilter;

use crate::platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "recruiter-console",
    version,
    about = "Terminal console for the recruiting HR/manager API"
)]
pub struct Cli {
    /// Base URL of the recruiting API.
    #[arg(long, env = "CONSOLE_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Directory holding the stored credential, saved filters and the log file.
    #[arg(long, env = "CONSOLE_STATE_DIR", default_value = "./.console_state")]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub transport: TransportSettings,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig> {
        let log_level = console_logging::parse_level(&self.log_level)
            .ok_or_else(|| anyhow!("unknown log level {:?}", self.log_level))?;
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("--base-url must not be empty"));
        }
        let log_destination = match self.log {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        };

        Ok(AppConfig {
            transport: TransportSettings {
                base_url: self.base_url.trim().to_string(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            state_dir: self.state_dir,
            log_destination,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Cli::parse_from(["recruiter-console"]).into_config().unwrap();
        assert_eq!(config.transport.base_url, "http://localhost:8080");
        assert_eq!(config.transport.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Cli::parse_from([
            "recruiter-console",
            "--base-url",
            "https://hr.example.com/",
            "--log",
            "both",
            "--log-level",
            "DEBUG",
            "--connect-timeout-secs",
            "2",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.transport.base_url, "https://hr.example.com/");
        assert_eq!(config.transport.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::Both);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result = Cli::parse_from(["recruiter-console", "--log-level", "loud"]).into_config();
        assert!(result.is_err());
    }
}
