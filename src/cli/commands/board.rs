//! Board commands: list, show, toggle, edit, delete, clear, stats.

use chrono::NaiveDateTime;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{EditArgs, ListArgs, OutputFormat};
use crate::error::TaskflowError;
use crate::features::board::{BoardQuery, BoardStats, ListFilter};
use crate::output::{format_stats, format_task, format_tasks};
use crate::storage::TaskStore;
use crate::tasks::{Task, TaskUpdate};

/// List tasks matching the filter and search.
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn list(
    store: &TaskStore,
    args: &ListArgs,
    default_filter: ListFilter,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TaskflowError> {
    let mut query = BoardQuery::new(args.filter.unwrap_or(default_filter));
    if let Some(term) = &args.search {
        query = query.with_search(term.as_str());
    }
    let tasks = query.apply(store.list()?, now);

    match format {
        OutputFormat::Json => format_tasks(&tasks, query.filter.as_str(), now, format),
        OutputFormat::Pretty => {
            let mut heading = format!("Tasks: {}", query.filter);
            if let Some(term) = &query.search {
                heading.push_str(&format!(" matching \"{term}\""));
            }
            format_tasks(&tasks, &heading, now, format)
        },
    }
}

/// Show one task.
///
/// # Errors
///
/// Returns an error if the id does not resolve.
pub fn show(store: &TaskStore, id: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    format_task(&store.get(id)?, now, format)
}

/// Toggle completion.
///
/// # Errors
///
/// Returns an error if the id does not resolve or the write fails.
pub fn toggle(store: &TaskStore, id: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    let task = store.toggle_complete(id)?;
    let verb = if task.completed { "Completed" } else { "Reopened" };
    confirm(&task, verb, now, format)
}

/// Apply field changes from the command line.
///
/// # Errors
///
/// Returns an error if no change was requested, the title is blank, or
/// the id does not resolve.
pub fn edit(store: &TaskStore, args: &EditArgs, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    let update = edit_update(args)?;
    let task = store.update(&args.id, &update)?;
    confirm(&task, "Updated", now, format)
}

fn edit_update(args: &EditArgs) -> Result<TaskUpdate, TaskflowError> {
    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            return Err(TaskflowError::InvalidInput("title cannot be empty".to_string()));
        }
    }

    let due_date = if args.clear_due {
        Some(None)
    } else {
        args.due.map(Some)
    };

    let update = TaskUpdate {
        title: args.title.as_ref().map(|t| t.trim().to_string()),
        assignee: args.assignee.as_ref().map(|a| a.trim().to_string()),
        due_date,
        priority: args.priority,
        completed: None,
    };

    if update.is_empty() {
        return Err(TaskflowError::InvalidInput(
            "nothing to change; pass --title, --assignee, --due, --clear-due or --priority"
                .to_string(),
        ));
    }
    Ok(update)
}

/// Delete one task.
///
/// # Errors
///
/// Returns an error if the id does not resolve or the delete fails.
pub fn delete(store: &TaskStore, id: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    let task = store.delete(id)?;
    confirm(&task, "Deleted", now, format)
}

/// Delete all completed tasks.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_completed(store: &TaskStore, format: OutputFormat) -> Result<String, TaskflowError> {
    let removed = store.clear_completed()?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "removed": removed }))?),
        OutputFormat::Pretty => Ok(format!("Removed {removed} completed task(s)")),
    }
}

/// Board counters.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn stats(store: &TaskStore, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    let stats = BoardStats::calculate(&store.list()?, now);
    format_stats(&stats, format)
}

fn confirm(task: &Task, verb: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    match format {
        OutputFormat::Json => format_task(task, now, format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} (ID: {})",
            format!("{verb}:").green().bold(),
            task.title,
            task.short_id().dimmed()
        )),
    }
}
