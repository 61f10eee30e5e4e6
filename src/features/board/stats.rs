//! Board counters.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::tasks::Task;

/// Counts over the whole board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Pending tasks whose due date has passed.
    pub overdue: usize,
}

impl BoardStats {
    #[must_use]
    pub fn calculate(tasks: &[Task], now: NaiveDateTime) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }

    /// Completed share of the board, 0.0 when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
