//! `taskflow add` and `taskflow parse`.

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::error::TaskflowError;
use crate::features::nlp::parse_task;
use crate::output::{format_parsed, format_task};
use crate::storage::TaskStore;
use crate::tasks::Task;

/// Parse the sentence and store the task, or only preview it.
///
/// # Errors
///
/// Returns an error if the sentence is blank or the insert fails.
pub fn add(
    store: &TaskStore,
    args: &AddArgs,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TaskflowError> {
    let text = sentence(&args.text)?;
    let parsed = parse_task(&text, now);

    if args.parse_only {
        return format_parsed(&parsed, format);
    }

    let task = Task::from_parsed(parsed, now);
    store.add(&task)?;

    let detail = format_task(&task, now, format)?;
    Ok(match format {
        OutputFormat::Json => detail,
        OutputFormat::Pretty => format!(
            "{} {} (ID: {})\n{detail}",
            "Added:".green().bold(),
            task.title,
            task.short_id().dimmed()
        ),
    })
}

/// Show the parser's reading of a sentence.
///
/// # Errors
///
/// Returns an error if the sentence is blank.
pub fn parse(words: &[String], now: NaiveDateTime, format: OutputFormat) -> Result<String, TaskflowError> {
    let text = sentence(words)?;
    format_parsed(&parse_task(&text, now), format)
}

fn sentence(words: &[String]) -> Result<String, TaskflowError> {
    let text = words.join(" ").trim().to_string();
    if text.is_empty() {
        return Err(TaskflowError::InvalidInput("task text is empty".to_string()));
    }
    Ok(text)
}
