//! JSON output.

use chrono::NaiveDateTime;
use serde_json::json;

use crate::error::TaskflowError;
use crate::features::board::BoardStats;
use crate::features::nlp::ParsedTask;
use crate::tasks::Task;

/// Tasks wrapped with their filter label and count.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], filter: &str, now: NaiveDateTime) -> Result<String, TaskflowError> {
    let items: Vec<_> = tasks.iter().map(|task| task_value(task, now)).collect::<Result<_, _>>()?;
    let output = json!({
        "filter": filter,
        "count": tasks.len(),
        "items": items,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// One task, with its computed overdue flag.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_task_json(task: &Task, now: NaiveDateTime) -> Result<String, TaskflowError> {
    Ok(serde_json::to_string_pretty(&task_value(task, now)?)?)
}

/// Parser result.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_parsed_json(parsed: &ParsedTask) -> Result<String, TaskflowError> {
    Ok(serde_json::to_string_pretty(parsed)?)
}

/// Board counters.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_stats_json(stats: &BoardStats) -> Result<String, TaskflowError> {
    let mut value = serde_json::to_value(stats)?;
    value["completionRate"] = json!(stats.completion_rate());
    Ok(serde_json::to_string_pretty(&value)?)
}

fn task_value(task: &Task, now: NaiveDateTime) -> Result<serde_json::Value, TaskflowError> {
    let mut value = serde_json::to_value(task)?;
    value["overdue"] = json!(task.is_overdue(now));
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nlp::parse_task;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_format_tasks_json() {
        let task = Task::from_parsed(parse_task("Finish report by Alice tomorrow 3pm P1", now()), now());
        let output = format_tasks_json(&[task], "pending", now()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["filter"], "pending");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["title"], "Finish report");
        assert_eq!(parsed["items"][0]["dueDate"], "2026-10-15T15:00:00");
        assert_eq!(parsed["items"][0]["overdue"], false);
    }

    #[test]
    fn test_format_parsed_json() {
        let output = format_parsed_json(&parse_task("Call mom by Sam P4", now())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["title"], "Call mom");
        assert_eq!(parsed["assignee"], "Sam");
        assert_eq!(parsed["priority"], "P4");
        assert!(parsed["dueDate"].is_null());
    }

    #[test]
    fn test_format_stats_json() {
        let stats = BoardStats {
            total: 2,
            completed: 1,
            pending: 1,
            overdue: 0,
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&format_stats_json(&stats).unwrap()).unwrap();
        assert_eq!(parsed["total"], 2);
        assert_eq!(parsed["completionRate"], 0.5);
    }
}
