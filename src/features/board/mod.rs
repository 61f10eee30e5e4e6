//! Board views: filtering, search, and counters over stored tasks.

mod filter;
mod stats;

pub use filter::{BoardQuery, ListFilter};
pub use stats::BoardStats;
