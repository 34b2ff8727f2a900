//! Directory-backed medium with atomic writes

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::StorageMedium;
use crate::error::{IndexError, Result};

const BLOB_EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Opens (and creates if missing) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|e| IndexError::persistence(&dir.display().to_string(), e))?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the blob file for `key`
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(IndexError::persistence(
            key,
            io::Error::new(ErrorKind::InvalidInput, "storage key must match [A-Za-z0-9_-]+"),
        ));
    }
    Ok(())
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IndexError::persistence(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;

        // Write atomically (temp file + rename)
        let temp_path = self.dir.join(format!("{}.{}.tmp", key, BLOB_EXTENSION));
        fs::write(&temp_path, value).map_err(|e| IndexError::persistence(key, e))?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(IndexError::persistence(key, e));
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IndexError::persistence(key, e)),
        }
    }
}
