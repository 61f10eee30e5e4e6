use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::core::{format_short_date, parse_timestamp};
use crate::features::nlp::{ParsedTask, Priority};

/// A stored task: the parsed fields plus identity and completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "taskName")]
    pub title: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default, deserialize_with = "revive_timestamp")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    /// One-line summary rebuilt from the parsed fields, not the raw text.
    #[serde(default)]
    pub original_input: String,
    #[serde(default, deserialize_with = "revive_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    /// Build a new open task from parser output.
    #[must_use]
    pub fn from_parsed(parsed: ParsedTask, created_at: NaiveDateTime) -> Self {
        let original_input = summary_line(&parsed);
        Self {
            id: Uuid::new_v4().to_string(),
            title: parsed.title,
            assignee: parsed.assignee,
            due_date: parsed.due_date,
            priority: parsed.priority,
            completed: false,
            original_input,
            created_at: Some(created_at),
        }
    }

    /// Open and due strictly before `now`.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Case-insensitive substring match on title or assignee.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.assignee.to_lowercase().contains(&needle)
    }

    /// First eight characters of the id, enough to address it from the CLI.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// `"<title> by <assignee> <M/D/YYYY> <priority>"`, skipping absent parts.
fn summary_line(parsed: &ParsedTask) -> String {
    let mut parts = vec![parsed.title.clone()];
    if parsed.has_assignee() {
        parts.push(format!("by {}", parsed.assignee));
    }
    if let Some(due) = &parsed.due_date {
        parts.push(format_short_date(due));
    }
    parts.push(parsed.priority.to_string());
    parts.join(" ").trim().to_string()
}

/// Accept any JSON value and keep it only if it is a valid timestamp string.
fn revive_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => {
            let revived = parse_timestamp(&s);
            if revived.is_none() {
                tracing::warn!(value = s.as_str(), "discarding invalid stored date");
            }
            revived
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(value = %other, "discarding non-string stored date");
            None
        },
    })
}

/// Partial update applied to an existing task. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub assignee: Option<String>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDateTime>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// True when the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.assignee.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    /// Apply the set fields to `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(assignee) = &self.assignee {
            task.assignee.clone_from(assignee);
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
