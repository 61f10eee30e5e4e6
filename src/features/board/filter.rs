//! List filtering and search.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::tasks::Task;

/// Which slice of the board to show.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    #[default]
    All,
    Pending,
    Completed,
    Overdue,
}

impl ListFilter {
    /// Filters in the order the board cycles through them.
    pub const ALL: [Self; 4] = [Self::All, Self::Pending, Self::Completed, Self::Overdue];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// The filter after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::Overdue,
            Self::Overdue => Self::All,
        }
    }

    /// Does `task` belong in this slice at `now`?
    #[must_use]
    pub fn matches(self, task: &Task, now: NaiveDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
            Self::Overdue => task.is_overdue(now),
        }
    }
}

impl std::fmt::Display for ListFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search term plus a filter, applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub filter: ListFilter,
    pub search: Option<String>,
}

impl BoardQuery {
    #[must_use]
    pub const fn new(filter: ListFilter) -> Self {
        Self {
            filter,
            search: None,
        }
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term.trim().to_string())
        };
        self
    }

    /// Keep the tasks matching the query, preserving order.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>, now: NaiveDateTime) -> Vec<Task> {
        tasks
            .into_iter()
            .filter(|task| self.search.as_deref().map_or(true, |term| task.matches_search(term)))
            .filter(|task| self.filter.matches(task, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, MockClock};
    use crate::features::nlp::parse_task;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn board(now: NaiveDateTime) -> Vec<Task> {
        let mut done = Task::from_parsed(parse_task("Buy milk by Bob", now), now);
        done.completed = true;
        let mut late = Task::from_parsed(parse_task("Pay rent by Alice tomorrow", now), now);
        late.due_date = Some(at(13, 9));
        vec![
            done,
            late,
            Task::from_parsed(parse_task("Plan trip next week", now), now),
        ]
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_filters() {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(at(14, 10));
        let now = clock.now();

        let all = BoardQuery::new(ListFilter::All).apply(board(now), now);
        assert_eq!(titles(&all), vec!["Buy milk", "Pay rent", "Plan trip"]);

        let pending = BoardQuery::new(ListFilter::Pending).apply(board(now), now);
        assert_eq!(titles(&pending), vec!["Pay rent", "Plan trip"]);

        let completed = BoardQuery::new(ListFilter::Completed).apply(board(now), now);
        assert_eq!(titles(&completed), vec!["Buy milk"]);

        let overdue = BoardQuery::new(ListFilter::Overdue).apply(board(now), now);
        assert_eq!(titles(&overdue), vec!["Pay rent"]);
    }

    #[test]
    fn test_search_then_filter() {
        let now = at(14, 10);
        let query = BoardQuery::new(ListFilter::Pending).with_search("ALICE");
        assert_eq!(titles(&query.apply(board(now), now)), vec!["Pay rent"]);

        let query = BoardQuery::new(ListFilter::Pending).with_search("bob");
        assert!(query.apply(board(now), now).is_empty());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = BoardQuery::default().with_search("   ");
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_cycle() {
        let mut filter = ListFilter::All;
        for expected in ListFilter::ALL.iter().skip(1) {
            filter = filter.next();
            assert_eq!(filter, *expected);
        }
        assert_eq!(filter.next(), ListFilter::All);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ListFilter::Overdue).unwrap(), "\"overdue\"");
        assert_eq!(
            serde_yaml::from_str::<ListFilter>("pending").unwrap(),
            ListFilter::Pending
        );
    }
}
