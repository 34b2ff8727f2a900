//! Keyed blob storage beneath the record store.
//!
//! A [`StorageMedium`] holds textual values under string keys, the way browser
//! local storage does. Two implementations ship with the crate:
//!
//! - [`MemoryMedium`]: process-local map with an optional byte quota, used by tests
//!   and by callers that do not need durability
//! - [`FileMedium`]: one `<key>.json` file per key inside a data directory, written
//!   atomically (temp file + rename)

pub mod file;
pub mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::error::Result;

pub trait StorageMedium {
    /// Returns the value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`. On error the previous value is left intact.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<M: StorageMedium + ?Sized> StorageMedium for Box<M> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
