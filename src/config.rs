//! Application Configuration
//!
//! This module provides configuration management for the board server,
//! supporting a YAML configuration file with sensible defaults and a small
//! set of environment overrides.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KanbanError, Result};

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "KANBAN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Task storage backend types
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum TaskBackend {
    #[default]
    SQLite,
    Mock,
}

impl std::str::FromStr for TaskBackend {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(TaskBackend::SQLite),
            "mock" => Ok(TaskBackend::Mock),
            _ => Err(KanbanError::Config(format!("Unknown task backend: {}", s))),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            workers: 4,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Storage backend type
    pub backend: TaskBackend,
    /// Database file path
    pub db_path: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Enable WAL mode
    pub wal_mode: bool,
    /// How long a connection waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,
    /// Create the tasks table on startup if it is missing
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: TaskBackend::SQLite,
            db_path: "kanban.db".to_string(),
            pool_size: 4,
            wal_mode: true,
            busy_timeout_ms: 5000,
            init_schema: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path to log4rs configuration file
    pub config_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            config_file: "server_log.yaml".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the file named by `KANBAN_CONFIG` (or
    /// `config.yaml`), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Self::config_path())?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file, using defaults if it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Apply `DB_FILE`, `TASK_BACKEND`, `KANBAN_HOST` and `KANBAN_PORT` on top
    /// of the file values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = env::var("DB_FILE") {
            self.database.db_path = path;
        }
        if let Ok(backend) = env::var("TASK_BACKEND") {
            self.database.backend = backend.parse()?;
        }
        if let Ok(host) = env::var("KANBAN_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("KANBAN_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| KanbanError::Config(format!("Invalid KANBAN_PORT: {}", port)))?;
        }
        Ok(())
    }
}
