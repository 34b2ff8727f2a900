//! Data models for the question history index.
//!
//! - [`GeneratedQuestion`] - a generated question, one [`QuestionKind`] variant per type
//! - [`HistoryRecord`] - one saved question plus its classification and creation time
//! - [`RecordMetadata`] - subject/topic/difficulty shared by a save call
//!
//! Records use serde with custom deserializers for the timestamp and id fields
//! (see the `deserializers` module). Questions are (de)serialized through a flat
//! wire layout matching the browser client's JSON.

pub mod deserializers;
pub mod question;
pub mod record;

pub use question::{
    Answer, ChoiceBody, ChoiceQuestion, ClozeBlank, EssayQuestion, FillInBlankQuestion,
    GeneratedQuestion, MatchPair, MatchingQuestion, OrderingQuestion, QuestionKind,
    ReadingQuestion, Statement, TrueFalseQuestion,
};
pub use record::{HistoryRecord, RecordMetadata};
