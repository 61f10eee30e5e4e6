//! Command implementations.
//!
//! Each handler returns the text to print; `main` does the printing.

mod add;
mod board;
mod completions;
mod config;
mod snapshot;

pub use add::{add, parse};
pub use board::{clear_completed, delete, edit, list, show, stats, toggle};
pub use completions::completions;
pub use config::config;
pub use snapshot::{export, import};
