//! taskflow - natural language task board
//!
//! Parses sentences like "Finish report by Alice tomorrow 3pm P1" into
//! structured tasks and keeps them in a local `SQLite` board.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TaskflowError;
pub use features::nlp::{parse_task, ParsedTask, Priority};
pub use storage::TaskStore;
pub use tasks::Task;
