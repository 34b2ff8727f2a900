//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, Utc};
use question_history::models::{GeneratedQuestion, HistoryRecord, RecordMetadata};
use question_history::storage::FileMedium;
use question_history::{FileHistory, RecordStore, StoreConfig};
use tempfile::TempDir;

/// Milliseconds used as "now" by fixtures
pub const BASE_MILLIS: i64 = 1_700_000_000_000;

pub fn at_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).expect("valid timestamp")
}

/// Builder for history records
pub struct RecordBuilder {
    id: String,
    question: GeneratedQuestion,
    created_at: DateTime<Utc>,
    metadata: RecordMetadata,
}

impl RecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            question: GeneratedQuestion::multiple_choice(
                format!("Question {}", id),
                vec!["first".to_string(), "second".to_string()],
                "A",
            ),
            created_at: at_millis(BASE_MILLIS),
            metadata: RecordMetadata::new(),
        }
    }

    pub fn question(mut self, question: GeneratedQuestion) -> Self {
        self.question = question;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.question.question = text.to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.metadata = self.metadata.subject(subject);
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.metadata = self.metadata.topic(topic);
        self
    }

    pub fn difficulty(mut self, difficulty: &str) -> Self {
        self.metadata = self.metadata.difficulty(difficulty);
        self
    }

    pub fn created_at(mut self, millis: i64) -> Self {
        self.created_at = at_millis(millis);
        self
    }

    pub fn build(self) -> HistoryRecord {
        let name = format!("{}_{}.txt", self.id, self.created_at.timestamp_millis());
        HistoryRecord::new(self.id, name, self.created_at, self.question, self.metadata)
    }
}

/// Question with options, for search tests
pub fn choice(text: &str, options: &[&str]) -> GeneratedQuestion {
    GeneratedQuestion::multiple_choice(text, options.iter().map(|o| o.to_string()).collect(), "A")
}

/// Store over a fresh temporary directory. Keep the `TempDir` alive for the test.
pub fn temp_store(config: StoreConfig) -> (TempDir, RecordStore<FileMedium>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(dir.path(), config);
    (dir, store)
}

pub fn open_store(dir: &Path, config: StoreConfig) -> RecordStore<FileMedium> {
    let medium = FileMedium::open(dir).expect("Failed to open file medium");
    RecordStore::open(medium, config)
}

pub fn temp_history() -> (TempDir, FileHistory<FileMedium>) {
    let (dir, store) = temp_store(StoreConfig::default());
    (dir, FileHistory::new(store))
}

pub fn ids(records: &[HistoryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
