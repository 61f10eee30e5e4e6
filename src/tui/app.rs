//! Application state for the TUI.

use crate::core::Clock;
use crate::error::TaskflowError;
use crate::features::board::{BoardQuery, BoardStats, ListFilter};
use crate::features::nlp::{parse_task, ParsedTask};
use crate::storage::TaskStore;
use crate::tasks::Task;

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// Application state.
pub struct App<'a> {
    store: &'a TaskStore,
    clock: &'a dyn Clock,
    /// Text being typed.
    pub input: String,
    /// Parser reading of `input`, refreshed on every edit.
    pub preview: ParsedTask,
    pub focus: Focus,
    pub filter: ListFilter,
    /// Tasks visible under `filter`, newest first.
    pub tasks: Vec<Task>,
    /// Counters over the whole board.
    pub stats: BoardStats,
    pub selected: usize,
    pub status: Option<String>,
    /// Pending 'g' key for 'gg'.
    pub pending_g: bool,
}

impl<'a> App<'a> {
    /// Create the app and load the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn new(store: &'a TaskStore, clock: &'a dyn Clock, filter: ListFilter) -> Result<Self, TaskflowError> {
        let mut app = Self {
            store,
            clock,
            input: String::new(),
            preview: ParsedTask::default(),
            focus: Focus::Input,
            filter,
            tasks: Vec::new(),
            stats: BoardStats::default(),
            selected: 0,
            status: Some("Type a task and press Enter. Tab switches to the list.".to_string()),
            pending_g: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Reload tasks and counters from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh(&mut self) -> Result<(), TaskflowError> {
        let now = self.clock.now();
        let all = self.store.list()?;
        self.stats = BoardStats::calculate(&all, now);
        self.tasks = BoardQuery::new(self.filter).apply(all, now);

        if self.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len() - 1;
        }
        Ok(())
    }

    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    fn reparse(&mut self) {
        self.preview = if self.input.trim().is_empty() {
            ParsedTask::default()
        } else {
            parse_task(&self.input, self.clock.now())
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.reparse();
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.reparse();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.reparse();
    }

    /// Store the typed task. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or reload fails.
    pub fn submit(&mut self) -> Result<(), TaskflowError> {
        if self.input.trim().is_empty() {
            return Ok(());
        }
        let now = self.clock.now();
        let task = Task::from_parsed(parse_task(&self.input, now), now);
        self.store.add(&task)?;
        self.status = Some(format!("Added: {}", task.title));
        self.clear_input();
        self.selected = 0;
        self.refresh()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
        self.pending_g = false;
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.pending_g = false;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tasks.len().saturating_sub(1);
        self.pending_g = false;
    }

    /// Flip completion on the selected task.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn toggle_selected(&mut self) -> Result<(), TaskflowError> {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            let task = self.store.toggle_complete(&id)?;
            let verb = if task.completed { "Completed" } else { "Reopened" };
            self.status = Some(format!("{verb}: {}", task.title));
            self.refresh()?;
        }
        Ok(())
    }

    /// Delete the selected task.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_selected(&mut self) -> Result<(), TaskflowError> {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            let task = self.store.delete(&id)?;
            self.status = Some(format!("Deleted: {}", task.title));
            self.refresh()?;
        }
        Ok(())
    }

    /// Move to the next list filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub fn cycle_filter(&mut self) -> Result<(), TaskflowError> {
        self.filter = self.filter.next();
        self.selected = 0;
        self.status = Some(format!("Filter: {}", self.filter));
        self.refresh()
    }

    /// Handle 'g' key for 'gg'.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    pub fn cancel_pending(&mut self) {
        if self.pending_g {
            self.pending_g = false;
            self.status = None;
        }
    }
}
