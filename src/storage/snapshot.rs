//! Portable JSON snapshots of the board.
//!
//! The format is a JSON array of tasks, newest first, with camelCase field
//! names. Older snapshots name the title `taskName`; both are accepted.

use uuid::Uuid;

use crate::error::TaskflowError;
use crate::tasks::Task;

/// Serialize tasks as a pretty-printed snapshot.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_snapshot(tasks: &[Task]) -> Result<String, TaskflowError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse a snapshot. Invalid dates are dropped, missing ids are generated.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of task objects.
pub fn parse_snapshot(json: &str) -> Result<Vec<Task>, TaskflowError> {
    let mut tasks: Vec<Task> = serde_json::from_str(json)?;
    for task in &mut tasks {
        if task.id.trim().is_empty() {
            task.id = Uuid::new_v4().to_string();
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nlp::Priority;
    use chrono::NaiveDate;

    #[test]
    fn test_export_then_parse() {
        let json = r#"[{"id": "1", "title": "Buy milk", "priority": "P2"}]"#;
        let tasks = parse_snapshot(json).unwrap();
        let exported = export_snapshot(&tasks).unwrap();

        assert!(exported.contains("\"originalInput\""));
        assert_eq!(parse_snapshot(&exported).unwrap(), tasks);
    }

    #[test]
    fn test_parse_board_format() {
        let json = r#"[
            {
                "id": "1700000000000",
                "taskName": "Finish report",
                "assignee": "Alice",
                "dueDate": "2026-10-15T22:00:00.000Z",
                "priority": "P1",
                "completed": false,
                "originalInput": "Finish report by Alice 10/15/2026 P1"
            },
            {
                "id": "1690000000000",
                "taskName": "Buy milk",
                "assignee": "",
                "dueDate": "Invalid Date",
                "priority": "P3",
                "completed": true,
                "originalInput": "Buy milk P3"
            }
        ]"#;
        let tasks = parse_snapshot(json).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Finish report");
        assert_eq!(tasks[0].priority, Priority::P1);
        assert!(tasks[0].due_date.is_some(), "RFC 3339 dates are revived");
        assert_eq!(tasks[1].due_date, None);
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_parse_naive_date() {
        let json = r#"[{"id": "1", "title": "Rent", "dueDate": "2026-12-01T00:00:00"}]"#;
        let tasks = parse_snapshot(json).unwrap();
        assert_eq!(
            tasks[0].due_date,
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_missing_ids_are_generated() {
        let json = r#"[{"title": "A"}, {"id": "", "title": "B"}]"#;
        let tasks = parse_snapshot(json).unwrap();
        assert!(tasks.iter().all(|t| t.id.len() == 36));
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_snapshot(r#"{"title": "A"}"#),
            Err(TaskflowError::Parse(_))
        ));
        assert!(parse_snapshot("not json").is_err());
    }
}
