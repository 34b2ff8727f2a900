//! Text output: question documents, relative timestamps and export file names.

pub mod filename;
pub mod question;
pub mod timestamp;

pub use filename::{index_export_filename, question_filename};
pub use question::{format_question_as_text, format_record_as_text, option_letter};
pub use timestamp::{format_timestamp, format_timestamp_at, format_timestamp_millis};
