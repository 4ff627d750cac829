//! Application State Management
//!
//! This module provides the application state that contains the task
//! service and its storage backend, built once from configuration at startup.

use log::info;
use std::sync::Arc;

use crate::config::{AppConfig, TaskBackend};
use crate::error::Result;
use crate::service::task_service::TaskService;
use crate::task::mock_store::MockTaskStore;
use crate::task::sqlite_store::SQLiteTaskStore;
use crate::task::TaskStorage;

/// Application state containing all services and their dependencies
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub config: AppConfig,
}

impl AppState {
    /// Create application state from configuration
    pub fn from_config(config: AppConfig) -> Result<Self> {
        info!("Initializing application state with configuration");

        let task_backend: Arc<dyn TaskStorage> = match config.database.backend {
            TaskBackend::SQLite => {
                info!(
                    "Using SQLite task backend with db_path: {}, pool_size: {}, wal_mode: {}",
                    config.database.db_path, config.database.pool_size, config.database.wal_mode
                );
                Arc::new(SQLiteTaskStore::new(&config.database)?)
            }
            TaskBackend::Mock => {
                info!("Using mock task backend");
                Arc::new(MockTaskStore::new())
            }
        };

        let task_service = Arc::new(TaskService::new(task_backend));

        info!("Application state initialized successfully");
        Ok(Self { task_service, config })
    }

    /// Create application state for testing with a mock backend
    pub fn new_for_testing() -> Self {
        let task_backend: Arc<dyn TaskStorage> = Arc::new(MockTaskStore::new());
        Self {
            task_service: Arc::new(TaskService::new(task_backend)),
            config: AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[actix_web::test]
    async fn test_from_config_with_mock_backend() {
        let config = AppConfig {
            database: DatabaseConfig {
                backend: TaskBackend::Mock,
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        };

        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.config.database.backend, TaskBackend::Mock);
        assert!(state.task_service.list_tasks().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_from_config_with_sqlite_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database: DatabaseConfig {
                db_path: dir.path().join("state.db").to_string_lossy().into_owned(),
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        };

        let state = AppState::from_config(config).unwrap();
        state.task_service.ensure_schema().await.unwrap();
        assert!(state.task_service.list_tasks().await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pool_size_fails() {
        let config = AppConfig {
            database: DatabaseConfig {
                pool_size: 0,
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(AppState::from_config(config).is_err());
    }
}
