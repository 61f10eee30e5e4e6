//! Output formatting for tasks, parser previews, and board counters.

mod json;
mod pretty;

use chrono::NaiveDateTime;

use crate::cli::args::OutputFormat;
use crate::error::TaskflowError;
use crate::features::board::BoardStats;
use crate::features::nlp::ParsedTask;
use crate::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format a task list based on output format.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    heading: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TaskflowError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, heading, now)),
        OutputFormat::Json => format_tasks_json(tasks, heading, now),
    }
}

/// Format a single task based on output format.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, now)),
        OutputFormat::Json => format_task_json(task, now),
    }
}

/// Format a parser preview based on output format.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_parsed(parsed: &ParsedTask, format: OutputFormat) -> Result<String, TaskflowError> {
    match format {
        OutputFormat::Pretty => Ok(format_parsed_pretty(parsed)),
        OutputFormat::Json => format_parsed_json(parsed),
    }
}

/// Format board counters based on output format.
///
/// # Errors
///
/// Returns `TaskflowError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &BoardStats, format: OutputFormat) -> Result<String, TaskflowError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}
