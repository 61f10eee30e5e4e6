//! Natural language parsing for task entry.
//!
//! This module turns sentences like:
//! - "Finish report by Alice tomorrow 3pm P1"
//! - "Submit taxes by April 15"
//! - "Standup at 9:45am"
//!
//! into a [`ParsedTask`] with a title, assignee, due date, and priority.

mod parser;
mod title;

pub use parser::{parse_task, ParsedTask, Priority};
pub use title::reduce_title;
