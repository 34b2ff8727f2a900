//! Persistent record index.
//!
//! The store keeps history records as one JSON array under a single key of a
//! [`StorageMedium`](crate::storage::StorageMedium):
//! - newest record first, bounded by [`StoreConfig::max_records`]
//! - ids generated from creation time plus random digits ([`generate_id`])
//! - every read decodes the blob afresh; a malformed blob is reported as
//!   [`IndexError::Corruption`](crate::error::IndexError::Corruption)

pub mod config;
pub mod id;
pub mod record_store;

pub use config::{DEFAULT_INDEX_KEY, DEFAULT_MAX_RECORDS, DEFAULT_RECENT_LIMIT, StoreConfig};
pub use id::generate_id;
pub use record_store::RecordStore;
