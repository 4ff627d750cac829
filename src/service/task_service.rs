//! Task service layer between the HTTP handlers and the TaskStorage backend.
//!
//! Storage calls block on SQLite, so each one is moved onto actix's blocking
//! thread pool.

use actix_web::web;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::error::Result;
use crate::task::{Task, TaskFields, TaskId, TaskStorage};

/// Task service that runs storage operations off the async workers
pub struct TaskService {
    store: Arc<dyn TaskStorage>,
}

impl TaskService {
    /// Create a new task service over a storage backend
    pub fn new(store: Arc<dyn TaskStorage>) -> Self {
        Self { store }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let store = Arc::clone(&self.store);
        let tasks = web::block(move || store.list_all()).await??;
        debug!("Returning {} tasks", tasks.len());
        Ok(tasks)
    }

    pub async fn create_task(&self, fields: TaskFields) -> Result<TaskId> {
        let store = Arc::clone(&self.store);
        let id = web::block(move || store.insert(&fields)).await??;
        info!("Created task {}", id);
        Ok(id)
    }

    /// Overwrite a task. An unknown id is logged and otherwise ignored.
    pub async fn update_task(&self, id: TaskId, fields: TaskFields) -> Result<()> {
        let store = Arc::clone(&self.store);
        let affected = web::block(move || store.update(id, &fields)).await??;
        if affected == 0 {
            warn!("Update matched no task with id {}", id);
        } else {
            info!("Updated task {}", id);
        }
        Ok(())
    }

    /// Delete a task. An unknown id is logged and otherwise ignored.
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let store = Arc::clone(&self.store);
        let affected = web::block(move || store.delete(id)).await??;
        if affected == 0 {
            warn!("Delete matched no task with id {}", id);
        } else {
            info!("Deleted task {}", id);
        }
        Ok(())
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let store = Arc::clone(&self.store);
        web::block(move || store.ensure_schema()).await??;
        Ok(())
    }
}
