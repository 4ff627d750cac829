//! Logging bootstrap.
//!
//! The server logs through the `log` facade. When the configured log4rs YAML
//! file exists it drives output; otherwise `env_logger` reads `RUST_LOG`
//! (default `info`).

use std::path::Path;

use crate::config::LoggingConfig;
use crate::error::{KanbanError, Result};

/// Which logger ended up installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBackend {
    Log4rs,
    EnvLogger,
}

pub fn init(config: &LoggingConfig) -> Result<LogBackend> {
    if Path::new(&config.config_file).exists() {
        log4rs::init_file(&config.config_file, Default::default()).map_err(|e| {
            KanbanError::Config(format!(
                "failed to load log config {}: {}",
                config.config_file, e
            ))
        })?;
        Ok(LogBackend::Log4rs)
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .map_err(|e| KanbanError::Config(format!("failed to install logger: {}", e)))?;
        Ok(LogBackend::EnvLogger)
    }
}

/// Tag subsequent log lines from this thread with the task being handled.
pub fn set_task_context(id: impl ToString) {
    log_mdc::insert("task_id", id.to_string());
}

pub fn clear_task_context() {
    log_mdc::remove("task_id");
}
