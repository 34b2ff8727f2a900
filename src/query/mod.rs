//! Read-only views over a record snapshot: search, field filters and statistics.
//!
//! Nothing here keeps derived state. Callers pass the snapshot they just read
//! from the store and get a fresh result back, so results can never disagree
//! with the store they came from.

pub mod filter;
pub mod parser;
pub mod stats;

pub use filter::{RecordFilter, apply_filter, filter_by_difficulty, filter_by_subject, search};
pub use parser::parse_query;
pub use stats::{IndexStats, compute_stats};
