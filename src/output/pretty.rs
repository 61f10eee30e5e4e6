//! Human-readable terminal output.

use std::fmt::Write;

use chrono::NaiveDateTime;
use colored::{ColoredString, Colorize};

use crate::core::format_due;
use crate::features::board::BoardStats;
use crate::features::nlp::{ParsedTask, Priority};
use crate::tasks::Task;

/// Priority badge in its board color.
#[must_use]
pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = priority.as_str();
    match priority {
        Priority::P1 => label.red().bold(),
        Priority::P2 => label.yellow(),
        Priority::P3 => label.blue(),
        Priority::P4 => label.dimmed(),
    }
}

fn due_label(task: &Task, now: NaiveDateTime) -> ColoredString {
    match &task.due_date {
        Some(due) if task.is_overdue(now) => format_due(due).red(),
        Some(due) => format_due(due).yellow(),
        None => "No due date".dimmed(),
    }
}

fn status_icon(task: &Task) -> ColoredString {
    if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

/// One line per task under a heading.
#[must_use]
pub fn format_tasks_pretty(tasks: &[Task], heading: &str, now: NaiveDateTime) -> String {
    if tasks.is_empty() {
        return format!("{heading} (0 tasks)\n  No tasks");
    }

    let mut output = format!("{heading} ({} tasks)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let title = if task.completed {
            task.title.strikethrough().dimmed()
        } else {
            task.title.bold()
        };
        let _ = write!(
            output,
            "{} {} {} {}",
            status_icon(task),
            task.short_id().dimmed(),
            priority_badge(task.priority),
            title
        );
        if !task.assignee.is_empty() {
            let _ = write!(output, "  {}", format!("@{}", task.assignee).cyan());
        }
        let _ = writeln!(output, "  {}", due_label(task, now));
    }

    output
}

/// Every field of one task.
#[must_use]
pub fn format_task_pretty(task: &Task, now: NaiveDateTime) -> String {
    let mut output = format!("{} {}\n", status_icon(task), task.title.bold());
    let _ = writeln!(output, "  {}: {}", "ID".dimmed(), task.id);
    let _ = writeln!(output, "  {}: {}", "Priority".dimmed(), priority_badge(task.priority));
    if !task.assignee.is_empty() {
        let _ = writeln!(output, "  {}: {}", "Assignee".dimmed(), task.assignee);
    }
    let _ = writeln!(output, "  {}: {}", "Due".dimmed(), due_label(task, now));
    if task.is_overdue(now) {
        let _ = writeln!(output, "  {}: {}", "Status".dimmed(), "overdue".red());
    } else if task.completed {
        let _ = writeln!(output, "  {}: {}", "Status".dimmed(), "completed".green());
    }
    if !task.original_input.is_empty() {
        let _ = writeln!(output, "  {}: {}", "Summary".dimmed(), task.original_input);
    }
    if let Some(created) = &task.created_at {
        let _ = writeln!(
            output,
            "  {}: {}",
            "Created".dimmed(),
            created.format("%Y-%m-%d %H:%M")
        );
    }
    output
}

/// Parser result preview.
#[must_use]
pub fn format_parsed_pretty(parsed: &ParsedTask) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", "Parsed task:".bold());
    let _ = writeln!(output, "  {}: {}", "Title".dimmed(), parsed.title);
    let assignee = if parsed.has_assignee() {
        parsed.assignee.cyan()
    } else {
        "Unassigned".dimmed()
    };
    let _ = writeln!(output, "  {}: {}", "Assignee".dimmed(), assignee);
    let _ = writeln!(output, "  {}: {}", "Due".dimmed(), parsed.due_display());
    let _ = writeln!(output, "  {}: {}", "Priority".dimmed(), priority_badge(parsed.priority));
    output
}

/// Board counters.
#[must_use]
pub fn format_stats_pretty(stats: &BoardStats) -> String {
    let mut output = format!("{}\n", "Board".bold());
    output.push_str(&"─".repeat(30));
    output.push('\n');
    let _ = writeln!(output, "  {:<10} {}", "Total", stats.total);
    let _ = writeln!(output, "  {:<10} {}", "Pending", stats.pending);
    let _ = writeln!(output, "  {:<10} {}", "Completed", stats.completed.to_string().green());
    let overdue = if stats.overdue > 0 {
        stats.overdue.to_string().red()
    } else {
        stats.overdue.to_string().normal()
    };
    let _ = writeln!(output, "  {:<10} {}", "Overdue", overdue);
    let _ = writeln!(
        output,
        "  {:<10} {:.0}%",
        "Done",
        stats.completion_rate() * 100.0
    );
    output
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

    fn task(input: &str) -> Task {
        Task::from_parsed(parse_task(input, now()), now())
    }

    #[test]
    fn test_format_tasks_empty() {
        let output = format_tasks_pretty(&[], "All", now());
        assert!(output.contains("All (0 tasks)"));
        assert!(output.contains("No tasks"));
    }

    #[test]
    fn test_format_tasks() {
        let tasks = vec![
            task("Finish report by Alice tomorrow 3pm P1"),
            task("Buy milk"),
        ];
        let output = format_tasks_pretty(&tasks, "All", now());

        assert!(output.contains("All (2 tasks)"));
        assert!(output.contains("Finish report"));
        assert!(output.contains("@Alice"));
        assert!(output.contains("Thu, Oct 15, 3:00 PM"));
        assert!(output.contains("No due date"));
        assert!(output.contains("P1"));
    }

    #[test]
    fn test_format_task_detail() {
        let mut t = task("Pay rent by Bob today P2");
        t.due_date = Some(now() - chrono::Duration::hours(2));
        let output = format_task_pretty(&t, now());

        assert!(output.contains(&t.id));
        assert!(output.contains("Bob"));
        assert!(output.contains("overdue"));
        assert!(output.contains("Created"));
    }

    #[test]
    fn test_format_parsed() {
        let output = format_parsed_pretty(&parse_task("Call mom", now()));
        assert!(output.contains("Call mom"));
        assert!(output.contains("Unassigned"));
        assert!(output.contains("No due date"));
        assert!(output.contains("P3"));
    }

    #[test]
    fn test_format_stats() {
        let stats = BoardStats {
            total: 4,
            completed: 1,
            pending: 3,
            overdue: 2,
        };
        let output = format_stats_pretty(&stats);
        assert!(output.contains("Total"));
        assert!(output.contains("25%"));
    }
}
