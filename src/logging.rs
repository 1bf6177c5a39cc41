use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::json::JsonEncoder,
};
use std::{env, path::PathBuf, str::FromStr};

use once_cell::sync::OnceCell;

use crate::config::LoggingConfig;

const DEFAULT_LOG_PATH: &str = "kubetable.log";

pub struct Logger;

pub static LOGGER_ENABLED: OnceCell<bool> = OnceCell::new();

/// Logs only after `Logger::init` succeeded, stdout belongs to the terminal UI.
#[macro_export]
macro_rules! logger {
    ($level:ident, $($arg:tt)+) => {
        if let Some(true) = $crate::logging::LOGGER_ENABLED.get() {
            ::log::$level!($($arg)+);
        }
    };
}

impl Logger {
    pub fn init(config: &LoggingConfig) -> Result<(), anyhow::Error> {
        let level_filter =
            LevelFilter::from_str(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))?;

        let logfile = FileAppender::builder()
            .append(false)
            .encoder(Box::new(JsonEncoder::new()))
            .build(log_path(config))?;

        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(level_filter))?;

        log4rs::init_config(config)?;

        LOGGER_ENABLED
            .set(true)
            .map_err(|_| anyhow::anyhow!("logger is already initialized"))?;

        Ok(())
    }
}

fn log_path(config: &LoggingConfig) -> PathBuf {
    env::var_os("LOG_PATH")
        .map(PathBuf::from)
        .or_else(|| config.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH))
}
