use std::collections::HashMap;
use std::io;

use super::StorageMedium;
use crate::error::{IndexError, Result};

/// In-memory medium. With a quota set, writes whose value exceeds it are rejected
/// the way a browser rejects writes past its storage quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    values: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { values: HashMap::new(), quota_bytes: Some(quota_bytes) }
    }

    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Stores `value` without quota checks. Lets tests plant arbitrary blobs.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes
            && value.len() > quota
        {
            return Err(IndexError::persistence(
                key,
                io::Error::other(format!(
                    "quota exceeded ({} bytes, limit {} bytes)",
                    value.len(),
                    quota
                )),
            ));
        }

        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut medium = MemoryMedium::new();
        assert_eq!(medium.get("k").unwrap(), None);

        medium.set("k", "value").unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("value"));

        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);

        // Removing again is fine
        medium.remove("k").unwrap();
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let mut medium = MemoryMedium::with_quota(8);
        medium.set("k", "short").unwrap();

        let err = medium.set("k", "much longer value").unwrap_err();
        assert_eq!(err.code(), "PERSISTENCE");
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_insert_raw_bypasses_quota() {
        let mut medium = MemoryMedium::with_quota(1);
        medium.insert_raw("k", "not checked");
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("not checked"));
    }
}
