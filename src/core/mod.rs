//! Core abstractions for taskflow.
//!
//! This module provides the clock seam and the date/time extraction shared by
//! the parser, storage, and output layers.

mod datetime;
mod traits;

pub use datetime::{
    extract_due_date, find_date, find_time_of_day, format_due, format_short_date,
    parse_timestamp, to_storage_string, Detection, TimeOfDay,
};
pub(crate) use datetime::{parse_month_name, MONTH_NAMES, WEEKDAY_NAMES};
#[cfg(test)]
pub use traits::MockClock;
pub use traits::{Clock, FixedClock, SystemClock};
