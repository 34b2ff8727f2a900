//! Bounded, newest-first record store over a [`StorageMedium`]

use tracing::{debug, warn};

use super::config::StoreConfig;
use crate::error::{IndexError, Result};
use crate::models::HistoryRecord;
use crate::storage::StorageMedium;

/// Handle over the persisted record index.
///
/// Every operation reads the current blob from the medium, so there is no cached
/// copy to go stale. Mutations write the whole list back under one key; a failed
/// write leaves the previous blob in place.
#[derive(Debug)]
pub struct RecordStore<M: StorageMedium> {
    medium: M,
    config: StoreConfig,
}

impl<M: StorageMedium> RecordStore<M> {
    pub fn open(medium: M, config: StoreConfig) -> Self {
        debug!(key = %config.index_key, max_records = config.max_records, "opened record store");
        Self { medium, config }
    }

    /// Releases the handle and hands back the medium.
    pub fn close(self) -> M {
        self.medium
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Prepends `record`, evicting from the tail beyond `max_records`.
    ///
    /// The caller guarantees the id is fresh; a blank id is refused. If the stored
    /// blob is corrupted the insert fails without overwriting it;
    /// [`clear`](Self::clear) resets the store.
    pub fn insert(&mut self, record: HistoryRecord) -> Result<()> {
        // Blank ids are rejected on decode, so one would poison the whole index
        if record.id.trim().is_empty() {
            return Err(IndexError::InvalidRecord { id: record.id, reason: "blank id" });
        }

        let mut records = self.load()?;
        let id = record.id.clone();

        records.insert(0, record);
        let evicted = records.len().saturating_sub(self.config.max_records);
        records.truncate(self.config.max_records);

        self.save(&records)?;
        debug!(%id, total = records.len(), evicted, "inserted record");
        Ok(())
    }

    /// Full snapshot, newest first. A missing blob is an empty store.
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Result<Option<HistoryRecord>> {
        Ok(self.load()?.into_iter().find(|record| record.id == id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Removes the record with `id`. Returns `false`, without writing, when absent.
    pub fn delete_by_id(&mut self, id: &str) -> Result<bool> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            debug!(%id, "delete skipped, id not present");
            return Ok(false);
        }

        self.save(&records)?;
        debug!(%id, total = records.len(), "deleted record");
        Ok(true)
    }

    /// Drops every record. Idempotent, and also discards a corrupted blob.
    pub fn clear(&mut self) -> Result<()> {
        self.medium.remove(&self.config.index_key)?;
        debug!(key = %self.config.index_key, "cleared record store");
        Ok(())
    }

    /// Pretty-printed JSON of the snapshot. Identical input gives identical bytes.
    pub fn export_all(&self) -> Result<String> {
        let records = self.load()?;
        serde_json::to_string_pretty(&records).map_err(IndexError::Encode)
    }

    fn load(&self) -> Result<Vec<HistoryRecord>> {
        let key = &self.config.index_key;
        let Some(blob) = self.medium.get(key)? else {
            return Ok(Vec::new());
        };

        if blob.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&blob).map_err(|source| {
            warn!(%key, error = %source, "stored record index is not decodable");
            IndexError::Corruption { key: key.clone(), source }
        })
    }

    fn save(&mut self, records: &[HistoryRecord]) -> Result<()> {
        let blob = serde_json::to_string(records).map_err(IndexError::Encode)?;
        self.medium.set(&self.config.index_key, &blob)
    }
}
