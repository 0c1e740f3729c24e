//! Logger setup for the console binary.
//!
//! Terminal output shares the screen with the console prompt, so file
//! logging is the default.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "console.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// `console.log` inside the state directory.
    File,
    /// stderr/stdout.
    Terminal,
    Both,
}

/// Installs the global logger. Failing to open the log file downgrades to
/// whatever destinations remain.
pub fn initialize(destination: LogDestination, level: LevelFilter, state_dir: &Path) {
    let config = build_config();
    let log_path = state_dir.join(LOG_FILENAME);

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("hyper")
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: PathBuf,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
