//! Task Storage Layer Abstraction
//!
//! This module defines the single persisted entity of the board and the
//! storage interface the HTTP layer talks to. Backends (SQLite, in-memory
//! mock) are interchangeable behind [`TaskStorage`].

pub mod mock_store;
pub mod schema;
pub mod sqlite_store;


use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Task identifier type
pub type TaskId = i64;

/// One card on the board, as stored in the `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    /// Board column; free-form.
    pub status: Option<String>,
    /// Free-form.
    pub priority: Option<String>,
    #[serde(with = "sqlite_timestamp")]
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Map a `SELECT id, title, description, status, priority, created_at` row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            priority: row.get("priority")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// The mutable fields of a task, as sent by clients on create and update.
///
/// Every key must be present in the JSON body. Scalar values are stored as
/// text the way a SQLite TEXT column would keep them. `description`, `status`
/// and `priority` accept `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskFields {
    #[serde(deserialize_with = "sqlite_text::required")]
    pub title: String,
    #[serde(deserialize_with = "sqlite_text::nullable")]
    pub description: Option<String>,
    #[serde(deserialize_with = "sqlite_text::nullable")]
    pub status: Option<String>,
    #[serde(deserialize_with = "sqlite_text::nullable")]
    pub priority: Option<String>,
}

impl TaskFields {
    pub fn new(title: &str, description: &str, status: &str, priority: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description.to_string()),
            status: Some(status.to_string()),
            priority: Some(priority.to_string()),
        }
    }
}

/// Trait defining the task storage interface
///
/// Each call runs exactly one SQL statement (or its in-memory equivalent).
/// `update` and `delete` succeed when no row matches and report the number
/// of affected rows so callers can log the miss.
pub trait TaskStorage: Send + Sync {
    /// Return every task
    fn list_all(&self) -> Result<Vec<Task>>;

    /// Insert a task and return the id the storage assigned to it
    fn insert(&self, fields: &TaskFields) -> Result<TaskId>;

    /// Overwrite all mutable fields of a task
    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<usize>;

    /// Remove a task permanently
    fn delete(&self, id: TaskId) -> Result<usize>;

    /// Create the backing schema if it does not exist yet
    fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }
}

/// Body field adapters applying TEXT affinity to JSON scalars.
///
/// Strings pass through, numbers keep their JSON spelling, booleans become
/// `1`/`0`. Arrays and objects are rejected.
mod sqlite_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_text<E: Error>(value: Value) -> Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text)),
            Value::Number(number) => Ok(Some(number.to_string())),
            Value::Bool(flag) => Ok(Some(if flag { "1" } else { "0" }.to_string())),
            Value::Array(_) | Value::Object(_) => {
                Err(E::custom("expected a string, number, boolean or null"))
            }
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        to_text::<D::Error>(Value::deserialize(deserializer)?)?
            .ok_or_else(|| D::Error::custom("value must not be null"))
    }

    pub fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        to_text(Value::deserialize(deserializer)?)
    }
}

/// Serde adapter keeping `created_at` in SQLite's `CURRENT_TIMESTAMP` text form.
mod sqlite_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
