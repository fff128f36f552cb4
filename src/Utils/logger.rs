use crate::settings::{DbConfig, SettingsError};
use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialised: {0}")]
    SetLogger(#[from] SetLoggerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Terminal logger at the configured level plus, when `log_file` is set, a file logger
/// that records everything from `debug` up.
pub fn init_logging(config: &DbConfig) -> Result<(), LoggingError> {
    let level = config.log_level_filter()?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &config.log_file {
        let file = File::create(log_file)?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
