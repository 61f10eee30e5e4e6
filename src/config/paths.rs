//! Path resolution for taskflow data.
//!
//! Everything lives under `~/.taskflow/` unless a different home is given:
//! - `config.yaml` - settings
//! - `tasks.db` - the task database

use std::path::PathBuf;

use crate::error::TaskflowError;

/// Locations of taskflow's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.taskflow/`
    pub root: PathBuf,
    /// Config file: `~/.taskflow/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.taskflow/tasks.db`
    pub database: PathBuf,
}

impl Paths {
    /// Paths under `$HOME/.taskflow`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TaskflowError> {
        let home = std::env::var("HOME")
            .map_err(|_| TaskflowError::Config("Could not determine home directory".to_string()))?;
        Ok(Self::with_root(PathBuf::from(home).join(".taskflow")))
    }

    /// Use `root` if given, the default location otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory is unknown.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, TaskflowError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Paths under a custom root.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("tasks.db"),
            root,
        }
    }

    /// Create the root directory if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TaskflowError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TaskflowError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
