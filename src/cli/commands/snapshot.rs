//! `taskflow export` and `taskflow import`.

use std::path::Path;

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::TaskflowError;
use crate::storage::{export_snapshot, parse_snapshot, TaskStore};

/// Write the board as JSON, to a file or as the command output.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub fn export(store: &TaskStore, file: Option<&Path>, format: OutputFormat) -> Result<String, TaskflowError> {
    let tasks = store.list()?;
    let snapshot = export_snapshot(&tasks)?;

    let Some(path) = file else {
        return Ok(snapshot);
    };

    std::fs::write(path, snapshot)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "exported snapshot");
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "exported": tasks.len(),
            "file": path.display().to_string(),
        }))?),
        OutputFormat::Pretty => Ok(format!("Exported {} task(s) to {}", tasks.len(), path.display())),
    }
}

/// Merge a snapshot file into the board.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the writes fail.
pub fn import(store: &mut TaskStore, file: &Path, format: OutputFormat) -> Result<String, TaskflowError> {
    let contents = std::fs::read_to_string(file)?;
    let tasks = parse_snapshot(&contents)?;
    let imported = store.upsert_all(&tasks)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "imported": imported }))?),
        OutputFormat::Pretty => Ok(format!("Imported {imported} task(s) from {}", file.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nlp::parse_task;
    use crate::tasks::Task;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file_then_import() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let source = TaskStore::open_in_memory().unwrap();
        source
            .add(&Task::from_parsed(parse_task("Buy milk", now), now))
            .unwrap();
        source
            .add(&Task::from_parsed(parse_task("Call mom by Sam", now), now))
            .unwrap();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.json");
        let message = export(&source, Some(&path), OutputFormat::Pretty).unwrap();
        assert!(message.contains("Exported 2 task(s)"));

        let mut target = TaskStore::open_in_memory().unwrap();
        import(&mut target, &path, OutputFormat::Pretty).unwrap();
        assert_eq!(target.list().unwrap(), source.list().unwrap());
    }

    #[test]
    fn test_export_to_stdout() {
        let store = TaskStore::open_in_memory().unwrap();
        assert_eq!(export(&store, None, OutputFormat::Pretty).unwrap(), "[]");
    }

    #[test]
    fn test_import_missing_file() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            import(&mut store, &temp_dir.path().join("nope.json"), OutputFormat::Pretty),
            Err(TaskflowError::Io(_))
        ));
    }
}
