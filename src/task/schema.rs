//! Schema bootstrap for the `tasks` table.

use log::info;
use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;

pub const CREATE_TASKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT,
    priority TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Create the `tasks` table on an open connection. Safe to run repeatedly.
pub fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_TASKS_TABLE, [])?;
    Ok(())
}

/// Open (or create) the database file and make sure the schema exists.
pub fn init_database(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    create_tasks_table(&conn)?;
    info!("Initialized tasks table in {}", path.display());
    Ok(())
}
