//! Task records built from parsed input.

mod types;

pub use types::{Task, TaskUpdate};
