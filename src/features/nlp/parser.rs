//! Natural language task parser.
//!
//! Parses strings like "Finish report by Alice tomorrow 3pm P1" into
//! structured task data. Extraction runs in a fixed order, each stage
//! handing its leftover text to the next:
//!
//! 1. priority (`P1`..`P4`)
//! 2. assignee (`by Alice`, `assigned to Bob`, ...)
//! 3. due date and time (read-only)
//! 4. title (everything date-like stripped from the stage 2 leftover)

use std::str::FromStr;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::title::reduce_title;
use crate::core::{extract_due_date, format_due, parse_month_name, WEEKDAY_NAMES};
use crate::error::TaskflowError;

/// Priority levels for tasks, `P1` being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent.
    P1,
    /// High.
    P2,
    /// Normal; used when no marker is present.
    #[default]
    P3,
    /// Low.
    P4,
}

impl Priority {
    /// All levels, most urgent first.
    pub const ALL: [Self; 4] = [Self::P1, Self::P2, Self::P3, Self::P4];

    /// Canonical label, e.g. `"P1"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }

    const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' => Some(Self::P1),
            b'2' => Some(Self::P2),
            b'3' => Some(Self::P3),
            b'4' => Some(Self::P4),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().as_bytes() {
            [b'p' | b'P', digit] => Self::from_digit(*digit),
            _ => None,
        };
        level.ok_or_else(|| {
            TaskflowError::InvalidInput(format!("priority must be P1, P2, P3 or P4, got '{s}'"))
        })
    }
}

/// Result of parsing a natural language task string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    /// The task title (main text after extracting all patterns).
    pub title: String,
    /// Who the task is for; empty when unassigned.
    pub assignee: String,
    /// When the task is due, in local time.
    pub due_date: Option<NaiveDateTime>,
    /// Task priority.
    pub priority: Priority,
}

impl ParsedTask {
    /// Check if an assignee was detected.
    #[must_use]
    pub fn has_assignee(&self) -> bool {
        !self.assignee.is_empty()
    }

    /// Human-readable due date, or `"No due date"`.
    #[must_use]
    pub fn due_display(&self) -> String {
        self.due_date
            .as_ref()
            .map_or_else(|| "No due date".to_string(), format_due)
    }
}

// Compiled regex patterns
static PRIORITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bP([1-4])\b").unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

/// Connector, then a name that stops right before a date/time word. The
/// trailing word is matched but not part of the assignee span.
static ASSIGNEE_BEFORE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:by|to|for|assign(?:ed)?\s+to|give\s+to)\s+([a-z]+(?:\s+[a-z]+)*?)\s+(?:(?:by|on|at|before|due|until|tomorrow|today|next|this)\b|([0-9]))",
    )
    .unwrap_or_else(|e| panic!("Invalid assignee regex: {e}"))
});

/// Connector, then a name running to the end of the text.
static ASSIGNEE_AT_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:by|to|for|assign(?:ed)?\s+to|give\s+to)\s+([a-z]+(?:\s+[a-z]+)*)$")
        .unwrap_or_else(|e| panic!("Invalid assignee regex: {e}"))
});

/// A number that reads as a clock time (`5pm`, `9:30`), not a day.
static CLOCK_TIME_AHEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9]{1,2}(?::[0-9]{2}|\s*(?:am|pm)\b)")
        .unwrap_or_else(|e| panic!("Invalid clock time regex: {e}"))
});

/// Words that open a date phrase and so never start a name.
static DATE_LEAD_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(?:tomorrow|today|next|this|{WEEKDAY_NAMES})$"))
        .unwrap_or_else(|e| panic!("Invalid date word regex: {e}"))
});

/// Parse a natural language task string into structured data.
///
/// `now` anchors relative dates such as `tomorrow` or `next friday`.
/// Parsing never fails: missing parts fall back to `P3`, no assignee, no due
/// date, and the raw input as title.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use taskflow::features::nlp::{parse_task, Priority};
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 14)
///     .and_then(|d| d.and_hms_opt(10, 30, 0))
///     .unwrap();
///
/// let task = parse_task("Finish report by Alice tomorrow 3pm P1", now);
/// assert_eq!(task.title, "Finish report");
/// assert_eq!(task.assignee, "Alice");
/// assert_eq!(task.priority, Priority::P1);
/// assert_eq!(task.due_date.unwrap().to_string(), "2026-10-15 15:00:00");
///
/// let task = parse_task("Call mom", now);
/// assert_eq!(task.title, "Call mom");
/// assert_eq!(task.priority, Priority::P3);
/// assert!(task.due_date.is_none());
/// ```
#[must_use]
pub fn parse_task(input: &str, now: NaiveDateTime) -> ParsedTask {
    let raw = input.trim();

    let (priority, without_priority) = extract_priority(raw);
    let (assignee, residual) = extract_assignee(&without_priority);
    let due_date = extract_due_date(&residual, now);

    let title = reduce_title(&residual);
    let title = if title.is_empty() {
        raw.to_string()
    } else {
        title
    };

    tracing::debug!(
        %priority,
        assignee = assignee.as_str(),
        ?due_date,
        title = title.as_str(),
        "parsed task"
    );

    ParsedTask {
        title,
        assignee,
        due_date,
        priority,
    }
}

/// Find the first whole-word priority token and remove it.
fn extract_priority(text: &str) -> (Priority, String) {
    let Some(caps) = PRIORITY_PATTERN.captures(text) else {
        return (Priority::default(), text.to_string());
    };

    let priority = caps[1]
        .bytes()
        .next()
        .and_then(Priority::from_digit)
        .unwrap_or_default();
    let remaining = PRIORITY_PATTERN.replace(text, "").trim().to_string();

    tracing::trace!(%priority, "priority token found");
    (priority, remaining)
}

/// Find an assignee phrase and remove the connector and name from the text.
///
/// Candidates that read as dates rather than names (`by tomorrow`,
/// `by next friday`, `by April 15`) are skipped.
fn extract_assignee(text: &str) -> (String, String) {
    for pattern in [&*ASSIGNEE_BEFORE_DATE, &*ASSIGNEE_AT_END] {
        let mut start = 0;
        while let Some(caps) = pattern.captures_at(text, start) {
            let (Some(phrase), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let before_day = caps
                .get(2)
                .is_some_and(|digit| !CLOCK_TIME_AHEAD.is_match(&text[digit.start()..]));

            if looks_like_name(name.as_str(), before_day) {
                let remaining = format!("{}{}", &text[..phrase.start()], &text[name.end()..]);
                tracing::trace!(assignee = name.as_str(), "assignee phrase found");
                return (name.as_str().trim().to_string(), remaining.trim().to_string());
            }

            // Connectors are ASCII, so one byte past the start is a char boundary.
            start = phrase.start() + 1;
        }
    }

    (String::new(), text.to_string())
}

/// Reject names that are really the start of a date phrase.
///
/// A trailing month only counts as a date when a day number follows it.
fn looks_like_name(name: &str, before_day: bool) -> bool {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };
    if DATE_LEAD_WORD.is_match(first) {
        return false;
    }

    let last = words.last().unwrap_or(first);
    !(before_day && parse_month_name(last).is_some())
}
