//! Task persistence on top of [`Database`].

use std::path::Path;

use rusqlite::{params, Row};

use crate::core::{parse_timestamp, to_storage_string};
use crate::error::TaskflowError;
use crate::features::nlp::Priority;
use crate::tasks::{Task, TaskUpdate};

use super::Database;

const SELECT_COLUMNS: &str =
    "SELECT id, title, assignee, due_date, priority, completed, original_input, created_at FROM tasks";

/// CRUD operations over the task table.
pub struct TaskStore {
    db: Database,
}

impl TaskStore {
    /// Wrap an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store backed by the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, TaskflowError> {
        Database::open_at(path).map(Self::new)
    }

    /// Open a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, TaskflowError> {
        Database::open_in_memory().map(Self::new)
    }

    /// Insert a new task.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a duplicate id.
    pub fn add(&self, task: &Task) -> Result<(), TaskflowError> {
        self.db.connection().execute(
            "INSERT INTO tasks (id, title, assignee, due_date, priority, completed, original_input, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id,
                task.title,
                task.assignee,
                task.due_date.as_ref().map(to_storage_string),
                task.priority.as_str(),
                task.completed,
                task.original_input,
                task.created_at.as_ref().map(to_storage_string),
            ],
        )?;
        tracing::debug!(id = task.id.as_str(), title = task.title.as_str(), "added task");
        Ok(())
    }

    /// Look up a task by full id or by a prefix shared by exactly one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskflowError::NotFound`] when nothing matches and
    /// [`TaskflowError::AmbiguousId`] when a prefix matches several tasks.
    pub fn get(&self, id_or_prefix: &str) -> Result<Task, TaskflowError> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(TaskflowError::InvalidInput("task id is empty".to_string()));
        }

        let mut stmt = self.db.connection().prepare(&format!(
            "{SELECT_COLUMNS} WHERE substr(id, 1, length(?1)) = ?1 ORDER BY seq DESC"
        ))?;
        let mut matches = stmt
            .query_map([needle], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(pos) = matches.iter().position(|t| t.id == needle) {
            return Ok(matches.swap_remove(pos));
        }

        match matches.len() {
            0 => Err(TaskflowError::NotFound(needle.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(TaskflowError::AmbiguousId {
                prefix: needle.to_string(),
                count,
            }),
        }
    }

    /// All tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<Task>, TaskflowError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY seq DESC"))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be resolved or written.
    pub fn update(&self, id_or_prefix: &str, update: &TaskUpdate) -> Result<Task, TaskflowError> {
        let mut task = self.get(id_or_prefix)?;
        update.apply(&mut task);
        self.write(&task)?;
        tracing::debug!(id = task.id.as_str(), "updated task");
        Ok(task)
    }

    /// Flip the completed flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be resolved or written.
    pub fn toggle_complete(&self, id_or_prefix: &str) -> Result<Task, TaskflowError> {
        let mut task = self.get(id_or_prefix)?;
        task.completed = !task.completed;
        self.write(&task)?;
        tracing::debug!(id = task.id.as_str(), completed = task.completed, "toggled task");
        Ok(task)
    }

    /// Remove a task and return what was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be resolved or deleted.
    pub fn delete(&self, id_or_prefix: &str) -> Result<Task, TaskflowError> {
        let task = self.get(id_or_prefix)?;
        self.db
            .connection()
            .execute("DELETE FROM tasks WHERE id = ?1", [&task.id])?;
        tracing::debug!(id = task.id.as_str(), "deleted task");
        Ok(task)
    }

    /// Remove every completed task. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_completed(&self) -> Result<usize, TaskflowError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM tasks WHERE completed = 1", [])?;
        tracing::debug!(removed, "cleared completed tasks");
        Ok(removed)
    }

    /// Insert or overwrite tasks by id in one transaction.
    ///
    /// `tasks` is newest first; rows are written oldest first so the
    /// listing order is preserved. Existing ids keep their position.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is committed then.
    pub fn upsert_all(&mut self, tasks: &[Task]) -> Result<usize, TaskflowError> {
        let tx = self.db.connection_mut().transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, title, assignee, due_date, priority, completed, original_input, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    assignee = excluded.assignee,
                    due_date = excluded.due_date,
                    priority = excluded.priority,
                    completed = excluded.completed,
                    original_input = excluded.original_input,
                    created_at = excluded.created_at",
            )?;
            for task in tasks.iter().rev() {
                stmt.execute(params![
                    task.id,
                    task.title,
                    task.assignee,
                    task.due_date.as_ref().map(to_storage_string),
                    task.priority.as_str(),
                    task.completed,
                    task.original_input,
                    task.created_at.as_ref().map(to_storage_string),
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(count = tasks.len(), "imported tasks");
        Ok(tasks.len())
    }

    fn write(&self, task: &Task) -> Result<(), TaskflowError> {
        let changed = self.db.connection().execute(
            "UPDATE tasks SET title = ?2, assignee = ?3, due_date = ?4, priority = ?5, completed = ?6
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.assignee,
                task.due_date.as_ref().map(to_storage_string),
                task.priority.as_str(),
                task.completed,
            ],
        )?;
        if changed == 0 {
            return Err(TaskflowError::NotFound(task.id.clone()));
        }
        Ok(())
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id: String = row.get(0)?;
    let due_raw: Option<String> = row.get(3)?;
    let priority_raw: String = row.get(4)?;
    let created_raw: Option<String> = row.get(7)?;

    let due_date = due_raw.as_deref().and_then(|raw| {
        let revived = parse_timestamp(raw);
        if revived.is_none() {
            tracing::warn!(id = id.as_str(), value = raw, "discarding invalid stored due date");
        }
        revived
    });
    let priority = priority_raw.parse::<Priority>().unwrap_or_else(|_| {
        tracing::warn!(id = id.as_str(), value = priority_raw.as_str(), "unknown stored priority");
        Priority::default()
    });

    Ok(Task {
        title: row.get(1)?,
        assignee: row.get(2)?,
        due_date,
        priority,
        completed: row.get(5)?,
        original_input: row.get(6)?,
        created_at: created_raw.as_deref().and_then(parse_timestamp),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nlp::parse_task;
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn task(input: &str) -> Task {
        Task::from_parsed(parse_task(input, now()), now())
    }

    fn task_with_id(id: &str, input: &str) -> Task {
        Task {
            id: id.to_string(),
            ..task(input)
        }
    }

    #[test]
    fn test_add_and_get() {
        let store = TaskStore::open_in_memory().unwrap();
        let added = task("Finish report by Alice tomorrow 3pm P1");
        store.add(&added).unwrap();

        let loaded = store.get(&added.id).unwrap();
        assert_eq!(loaded, added);
    }

    #[test]
    fn test_list_newest_first() {
        let store = TaskStore::open_in_memory().unwrap();
        let first = task("Buy milk");
        let second = task("Call mom");
        store.add(&first).unwrap();
        store.add(&second).unwrap();

        let titles: Vec<_> = store.list().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Call mom", "Buy milk"]);
    }

    #[test]
    fn test_get_by_prefix() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add(&task_with_id("abc123", "Buy milk")).unwrap();
        store.add(&task_with_id("abd456", "Call mom")).unwrap();

        assert_eq!(store.get("abc").unwrap().title, "Buy milk");
        assert!(matches!(
            store.get("ab"),
            Err(TaskflowError::AmbiguousId { count: 2, .. })
        ));
        assert!(matches!(store.get("zzz"), Err(TaskflowError::NotFound(_))));
        assert!(matches!(store.get("  "), Err(TaskflowError::InvalidInput(_))));
    }

    #[test]
    fn test_exact_id_beats_longer_prefix_match() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add(&task_with_id("abc", "Short")).unwrap();
        store.add(&task_with_id("abcdef", "Long")).unwrap();

        assert_eq!(store.get("abc").unwrap().title, "Short");
    }

    #[test]
    fn test_prefix_with_like_wildcards() {
        let store = TaskStore::open_in_memory().unwrap();
        store.add(&task_with_id("abc", "Buy milk")).unwrap();
        assert!(matches!(store.get("a%"), Err(TaskflowError::NotFound(_))));
        assert!(matches!(store.get("a_c"), Err(TaskflowError::NotFound(_))));
    }

    #[test]
    fn test_update() {
        let store = TaskStore::open_in_memory().unwrap();
        let added = task("Finish report by Alice tomorrow 3pm P1");
        store.add(&added).unwrap();

        let update = TaskUpdate {
            assignee: Some("Bob".to_string()),
            due_date: Some(None),
            ..Default::default()
        };
        let updated = store.update(&added.id, &update).unwrap();
        assert_eq!(updated.assignee, "Bob");
        assert_eq!(updated.due_date, None);
        assert_eq!(store.get(&added.id).unwrap(), updated);
    }

    #[test]
    fn test_toggle_complete() {
        let store = TaskStore::open_in_memory().unwrap();
        let added = task("Buy milk");
        store.add(&added).unwrap();

        assert!(store.toggle_complete(&added.id).unwrap().completed);
        assert!(!store.toggle_complete(&added.id).unwrap().completed);
    }

    #[test]
    fn test_delete() {
        let store = TaskStore::open_in_memory().unwrap();
        let added = task("Buy milk");
        store.add(&added).unwrap();

        let removed = store.delete(&added.id).unwrap();
        assert_eq!(removed.id, added.id);
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.delete(&added.id), Err(TaskflowError::NotFound(_))));
    }

    #[test]
    fn test_clear_completed() {
        let store = TaskStore::open_in_memory().unwrap();
        let done = task("Buy milk");
        let open = task("Call mom");
        store.add(&done).unwrap();
        store.add(&open).unwrap();
        store.toggle_complete(&done.id).unwrap();

        assert_eq!(store.clear_completed().unwrap(), 1);
        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, open.id);
    }

    #[test]
    fn test_invalid_stored_date_is_discarded() {
        let store = TaskStore::open_in_memory().unwrap();
        let added = task("Buy milk tomorrow");
        store.add(&added).unwrap();
        store
            .db
            .connection()
            .execute(
                "UPDATE tasks SET due_date = 'Invalid Date', priority = 'P9' WHERE id = ?1",
                [&added.id],
            )
            .unwrap();

        let loaded = store.get(&added.id).unwrap();
        assert_eq!(loaded.due_date, None);
        assert_eq!(loaded.priority, Priority::P3);
    }

    #[test]
    fn test_upsert_all_preserves_order() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let existing = task_with_id("keep", "Old title");
        store.add(&existing).unwrap();

        let incoming = vec![
            task_with_id("newest", "Newest"),
            task_with_id("keep", "New title"),
            task_with_id("oldest", "Oldest"),
        ];
        assert_eq!(store.upsert_all(&incoming).unwrap(), 3);

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["newest", "oldest", "keep"]);
        assert_eq!(store.get("keep").unwrap().title, "New title");
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.db");
        let added = task("Buy milk");

        TaskStore::open_at(&path).unwrap().add(&added).unwrap();
        let reopened = TaskStore::open_at(&path).unwrap();
        assert_eq!(reopened.get(&added.id).unwrap(), added);
    }
}
