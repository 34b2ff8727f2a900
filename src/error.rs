use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

/// Failures surfaced by the record store and its collaborators.
///
/// The [`FileHistory`](crate::history::FileHistory) facade logs these and turns
/// them into empty results or `false`, so a presentation layer never has to
/// handle them directly.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The storage medium is unavailable or rejected a write (e.g. quota exceeded).
    #[error("storage medium failed for `{key}`: {source}")]
    Persistence {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A blob is present under `key` but does not decode as a record list.
    #[error("stored index under `{key}` is corrupted: {source}")]
    Corruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record would not survive a decode of the stored index.
    #[error("record `{id}` cannot be stored: {reason}")]
    InvalidRecord { id: String, reason: &'static str },

    #[error("failed to encode index: {0}")]
    Encode(#[source] serde_json::Error),

    /// The artifact sink could not deliver a document.
    #[error("failed to emit `{name}`: {source}")]
    Emit {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    pub fn persistence(key: &str, source: io::Error) -> Self {
        Self::Persistence { key: key.to_string(), source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Persistence { .. } => "PERSISTENCE",
            Self::Corruption { .. } => "CORRUPTION",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::Encode(_) => "ENCODE",
            Self::Emit { .. } => "EMIT",
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}
