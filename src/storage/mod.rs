//! Storage layer: `SQLite` task persistence and JSON snapshots.

mod database;
mod migrations;
mod snapshot;
mod store;

pub use database::Database;
pub use snapshot::{export_snapshot, parse_snapshot};
pub use store::TaskStore;
