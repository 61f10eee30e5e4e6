//! Feature implementations.
//!
//! - Natural language parsing of task sentences
//! - Board filtering, search, and counters

pub mod board;
pub mod nlp;
