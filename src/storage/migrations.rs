//! Schema migrations, tracked with `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::TaskflowError;

/// Current schema version.
const CURRENT_VERSION: i32 = 2;

/// Read the schema version. A fresh database reports 0.
pub fn get_version(conn: &Connection) -> Result<i32, TaskflowError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| TaskflowError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), TaskflowError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| TaskflowError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), TaskflowError> {
    let current = get_version(conn)?;
    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), TaskflowError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => Err(TaskflowError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// v1: the task table. `seq` orders rows by insertion.
fn migrate_v1(conn: &Connection) -> Result<(), TaskflowError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS tasks (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            assignee TEXT NOT NULL DEFAULT '',
            due_date TEXT,
            priority TEXT NOT NULL DEFAULT 'P3',
            completed INTEGER NOT NULL DEFAULT 0,
            original_input TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_completed
        ON tasks(completed);
        ",
    )
    .map_err(|e| TaskflowError::Database(format!("Migration v1 failed: {e}")))
}

/// v2: creation timestamps.
fn migrate_v2(conn: &Connection) -> Result<(), TaskflowError> {
    conn.execute_batch("ALTER TABLE tasks ADD COLUMN created_at TEXT;")
        .map_err(|e| TaskflowError::Database(format!("Migration v2 failed: {e}")))
}
