//! `SQLite` connection handling.
//!
//! The database lives at `~/.taskflow/tasks.db` unless the home directory
//! is overridden.

use std::path::Path;

use rusqlite::Connection;

use crate::error::TaskflowError;

use super::migrations;

/// Database connection wrapper. Migrations run on open.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, TaskflowError> {
        let conn = Connection::open(path).map_err(|e| {
            TaskflowError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "opened task database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, TaskflowError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TaskflowError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, TaskflowError> {
        let db = Self { conn };
        migrations::run(&db.conn)?;
        Ok(db)
    }

    /// Current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, TaskflowError> {
        migrations::get_version(&self.conn)
    }

    #[must_use]
    pub(crate) const fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
