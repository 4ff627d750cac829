//! Mock implementation of TaskStorage trait for testing

use chrono::{SubsecRound, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::task::{Task, TaskFields, TaskId, TaskStorage};

/// Mock implementation of TaskStorage, holding tasks in memory
///
/// Mirrors the SQLite backend: ids start at 1, are never reused, and updates
/// or deletes of unknown ids are silent no-ops.
pub struct MockTaskStore {
    data: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    last_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

impl MockTaskStore {
    /// Create a new mock task store
    pub fn new() -> Self {
        Self {
            data: Mutex::new(MockState::default()),
        }
    }

    /// Clear all tasks from the store (useful for test cleanup)
    pub fn clear(&self) {
        self.state().tasks.clear();
    }

    /// Get the number of stored tasks
    pub fn task_count(&self) -> usize {
        self.state().tasks.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStorage for MockTaskStore {
    fn list_all(&self) -> Result<Vec<Task>> {
        Ok(self.state().tasks.values().cloned().collect())
    }

    fn insert(&self, fields: &TaskFields) -> Result<TaskId> {
        let mut state = self.state();
        state.last_id += 1;
        let id = state.last_id;
        state.tasks.insert(
            id,
            Task {
                id,
                title: fields.title.clone(),
                description: fields.description.clone(),
                status: fields.status.clone(),
                priority: fields.priority.clone(),
                created_at: Utc::now().naive_utc().trunc_subsecs(0),
            },
        );
        Ok(id)
    }

    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<usize> {
        let mut state = self.state();
        match state.tasks.get_mut(&id) {
            Some(task) => {
                task.title = fields.title.clone();
                task.description = fields.description.clone();
                task.status = fields.status.clone();
                task.priority = fields.priority.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&self, id: TaskId) -> Result<usize> {
        Ok(self.state().tasks.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_store_basic_operations() {
        let store = MockTaskStore::new();
        assert_eq!(store.task_count(), 0);

        let id = store.insert(&TaskFields::new("Write docs", "API guide", "todo", "medium")).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.task_count(), 1);

        store.update(id, &TaskFields::new("Write docs", "API guide", "review", "medium")).unwrap();
        assert_eq!(store.list_all().unwrap()[0].status.as_deref(), Some("review"));

        assert_eq!(store.delete(id).unwrap(), 1);
        assert_eq!(store.task_count(), 0);
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let store = MockTaskStore::new();
        store.insert(&TaskFields::new("a", "", "todo", "low")).unwrap();
        store.insert(&TaskFields::new("b", "", "todo", "low")).unwrap();
        store.clear();

        assert_eq!(store.task_count(), 0);
        assert_eq!(store.insert(&TaskFields::new("c", "", "todo", "low")).unwrap(), 3);
    }

    #[test]
    fn test_created_at_has_whole_seconds() {
        let store = MockTaskStore::new();
        store.insert(&TaskFields::new("a", "", "todo", "low")).unwrap();

        let created_at = store.list_all().unwrap()[0].created_at;
        assert_eq!(created_at, created_at.trunc_subsecs(0));
    }
}
