//! Question History - a bounded local index of generated questions
//!
//! This library keeps the questions produced by a question generator in a
//! small, self-contained history. It provides:
//!
//! - A bounded, newest-first record store over an injectable storage medium
//! - Search, field filters and aggregate statistics over a snapshot
//! - Plain-text rendering of questions, relative timestamps and export file names
//!
//! # Example
//!
//! ```no_run
//! use question_history::models::{GeneratedQuestion, RecordMetadata};
//! use question_history::storage::FileMedium;
//! use question_history::{FileHistory, RecordStore, StoreConfig};
//!
//! let medium = FileMedium::open("/tmp/question-history")?;
//! let mut history = FileHistory::new(RecordStore::open(medium, StoreConfig::default()));
//!
//! let question = GeneratedQuestion::multiple_choice("2 + 2 = ?", vec!["3".into(), "4".into()], "B");
//! history.save_question(question, &RecordMetadata::new().subject("toan"));
//! println!("{} saved questions", history.stats().total_files);
//! # Ok::<(), question_history::IndexError>(())
//! ```

pub mod cli;
pub mod error;
pub mod format;
pub mod history;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::IndexError;
pub use format::{format_question_as_text, format_timestamp};
pub use history::FileHistory;
pub use models::{GeneratedQuestion, HistoryRecord, RecordMetadata};
pub use query::{IndexStats, RecordFilter};
pub use store::{RecordStore, StoreConfig};
