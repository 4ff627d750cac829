//! SQLite implementation of TaskStorage trait

use log::{debug, info};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{KanbanError, Result};
use crate::task::schema::create_tasks_table;
use crate::task::{Task, TaskFields, TaskId, TaskStorage};

const POOL_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite implementation of TaskStorage
///
/// Every call checks one connection out of the pool. The checkout guard hands
/// the connection back when it goes out of scope, whether the statement
/// succeeded or not.
pub struct SQLiteTaskStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SQLiteTaskStore {
    /// Create a new SQLite task store backed by the configured file
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        if config.pool_size == 0 {
            return Err(KanbanError::Config("database.pool_size must be at least 1".to_string()));
        }

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let wal_mode = config.wal_mode;
        let manager = SqliteConnectionManager::file(&config.db_path).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            if wal_mode {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
            }
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(POOL_CHECKOUT_TIMEOUT)
            .build(manager)?;

        info!(
            "Opened SQLite task store at {} (pool_size: {}, wal_mode: {})",
            config.db_path, config.pool_size, config.wal_mode
        );
        Ok(Self { pool })
    }
}

impl TaskStorage for SQLiteTaskStore {
    fn list_all(&self) -> Result<Vec<Task>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, priority, created_at FROM tasks ORDER BY id",
        )?;
        let tasks = stmt
            .query_map([], Task::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!("Listed {} tasks", tasks.len());
        Ok(tasks)
    }

    fn insert(&self, fields: &TaskFields) -> Result<TaskId> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO tasks (title, description, status, priority) VALUES (?1, ?2, ?3, ?4)",
            params![fields.title, fields.description, fields.status, fields.priority],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<usize> {
        let conn = self.pool.get()?;
        let affected = conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, status = ?3, priority = ?4 WHERE id = ?5",
            params![fields.title, fields.description, fields.status, fields.priority, id],
        )?;
        Ok(affected)
    }

    fn delete(&self, id: TaskId) -> Result<usize> {
        let conn = self.pool.get()?;
        let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(affected)
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.pool.get()?;
        create_tasks_table(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(pool_size: u32) -> (TempDir, SQLiteTaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            db_path: dir.path().join("kanban.db").to_string_lossy().into_owned(),
            pool_size,
            ..DatabaseConfig::default()
        };
        let store = SQLiteTaskStore::new(&config).unwrap();
        store.ensure_schema().unwrap();
        (dir, store)
    }

    #[test]
    fn test_sqlite_task_store_basic_operations() {
        let (_dir, store) = open_store(2);

        let id = store.insert(&TaskFields::new("Buy milk", "2%", "todo", "low")).unwrap();
        assert_eq!(id, 1);

        let tasks = store.list_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].description.as_deref(), Some("2%"));
        assert_eq!(tasks[0].status.as_deref(), Some("todo"));
        assert_eq!(tasks[0].priority.as_deref(), Some("low"));

        let affected = store
            .update(id, &TaskFields::new("Buy oat milk", "1L", "done", "high"))
            .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(store.list_all().unwrap()[0].title, "Buy oat milk");

        assert_eq!(store.delete(id).unwrap(), 1);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_database_assigns_created_at() {
        let (_dir, store) = open_store(1);
        let before = chrono::Utc::now().naive_utc() - chrono::Duration::seconds(5);

        store.insert(&TaskFields::new("Stamp", "", "todo", "info")).unwrap();
        let created_at = store.list_all().unwrap()[0].created_at;

        assert!(created_at >= before);
        assert!(created_at <= chrono::Utc::now().naive_utc() + chrono::Duration::seconds(5));
    }

    #[test]
    fn test_nulls_round_trip() {
        let (_dir, store) = open_store(1);
        let fields = TaskFields {
            title: "Bare".to_string(),
            description: None,
            status: None,
            priority: None,
        };

        store.insert(&fields).unwrap();
        let task = &store.list_all().unwrap()[0];
        assert!(task.description.is_none());
        assert!(task.status.is_none());
        assert!(task.priority.is_none());
    }

    #[test]
    fn test_missing_rows_affect_nothing() {
        let (_dir, store) = open_store(1);
        store.insert(&TaskFields::new("Keep me", "", "todo", "low")).unwrap();

        assert_eq!(store.update(42, &TaskFields::new("x", "x", "x", "x")).unwrap(), 0);
        assert_eq!(store.delete(42).unwrap(), 0);

        let tasks = store.list_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Keep me");
    }

    #[test]
    fn test_connections_return_to_pool_after_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            db_path: dir.path().join("kanban.db").to_string_lossy().into_owned(),
            pool_size: 1,
            ..DatabaseConfig::default()
        };
        let store = SQLiteTaskStore::new(&config).unwrap();

        // No schema yet: every statement fails.
        for _ in 0..3 {
            assert!(matches!(store.list_all(), Err(KanbanError::Database(_))));
        }

        // The single pooled connection is still available.
        store.ensure_schema().unwrap();
        for i in 0..10 {
            store.insert(&TaskFields::new(&format!("task {}", i), "", "todo", "low")).unwrap();
        }
        assert_eq!(store.list_all().unwrap().len(), 10);
    }

    #[test]
    fn test_pooled_connections_get_pragmas() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            db_path: dir.path().join("kanban.db").to_string_lossy().into_owned(),
            busy_timeout_ms: 1234,
            ..DatabaseConfig::default()
        };
        let store = SQLiteTaskStore::new(&config).unwrap();

        let conn = store.pool.get().unwrap();
        let journal_mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)).unwrap();
        let busy_timeout: i64 = conn.query_row("PRAGMA busy_timeout", [], |row| row.get(0)).unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
        assert_eq!(busy_timeout, config.busy_timeout_ms as i64);
    }

    #[test]
    fn test_wal_mode_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            db_path: dir.path().join("kanban.db").to_string_lossy().into_owned(),
            wal_mode: false,
            ..DatabaseConfig::default()
        };
        let store = SQLiteTaskStore::new(&config).unwrap();

        let conn = store.pool.get().unwrap();
        let journal_mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)).unwrap();
        assert_ne!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let config = DatabaseConfig {
            pool_size: 0,
            ..DatabaseConfig::default()
        };
        assert!(matches!(SQLiteTaskStore::new(&config), Err(KanbanError::Config(_))));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let (_dir, store) = open_store(1);
        let first = store.insert(&TaskFields::new("a", "", "todo", "low")).unwrap();
        let second = store.insert(&TaskFields::new("b", "", "todo", "low")).unwrap();
        store.delete(second).unwrap();

        let third = store.insert(&TaskFields::new("c", "", "todo", "low")).unwrap();
        assert!(third > second && second > first);
    }
}
