//! Error types for taskflow.

use thiserror::Error;

/// Errors that can occur while running taskflow.
#[derive(Debug, Error)]
pub enum TaskflowError {
    /// Configuration could not be read, written, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No task matches the given id.
    #[error("Task not found: {0}")]
    NotFound(String),

    /// An id prefix matches more than one task.
    #[error("Ambiguous task id '{prefix}' matches {count} tasks")]
    AmbiguousId {
        /// The prefix the user typed.
        prefix: String,
        /// How many tasks share it.
        count: usize,
    },

    /// User-supplied input could not be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The terminal UI failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<rusqlite::Error> for TaskflowError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
