//! Downloadable documents and the sinks that deliver them.
//!
//! Saving a record and emitting a document are separate capabilities: the
//! [`FileHistory`](super::FileHistory) facade persists first and only then hands
//! an [`Artifact`] to its sink, if it has one.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{IndexError, Result};
use crate::format::{format_record_as_text, index_export_filename};
use crate::models::HistoryRecord;

pub const TEXT_MEDIA_TYPE: &str = "text/plain; charset=utf-8";
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Bytes plus the name a user would save them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub media_type: &'static str,
    pub contents: Vec<u8>,
}

impl Artifact {
    /// Rendered text document for one record, named after its suggested name
    pub fn for_record(record: &HistoryRecord) -> Self {
        Self {
            name: record.suggested_name.clone(),
            media_type: TEXT_MEDIA_TYPE,
            contents: format_record_as_text(record).into_bytes(),
        }
    }

    /// Exported index document
    pub fn for_index_export(export: String, now: DateTime<Utc>) -> Self {
        Self {
            name: index_export_filename(now),
            media_type: JSON_MEDIA_TYPE,
            contents: export.into_bytes(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }
}

/// "Emit bytes with a suggested name"
pub trait ArtifactSink {
    fn emit(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Writes artifacts as files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn emit(&mut self, artifact: &Artifact) -> Result<()> {
        let emit_error = |source: io::Error| IndexError::Emit { name: artifact.name.clone(), source };

        // Names come from sanitized text, but never let one escape the directory
        let file_name = Path::new(&artifact.name);
        if file_name.components().count() != 1 || file_name.file_name().is_none() {
            return Err(emit_error(io::Error::new(
                ErrorKind::InvalidInput,
                "artifact name must be a plain file name",
            )));
        }

        fs::create_dir_all(&self.dir).map_err(emit_error)?;
        fs::write(self.dir.join(file_name), &artifact.contents).map_err(emit_error)
    }
}

/// Keeps emitted artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl ArtifactSink for MemorySink {
    fn emit(&mut self, artifact: &Artifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}
