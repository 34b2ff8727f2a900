use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::question::GeneratedQuestion;

/// Classification shared by every question saved in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// One saved question instance.
///
/// Serialized with the field names of the browser index (`filename`, `timestamp`)
/// so exported documents remain interchangeable with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "crate::models::deserializers::deserialize_record_id")]
    pub id: String,
    #[serde(rename = "filename")]
    pub suggested_name: String,
    #[serde(
        rename = "timestamp",
        serialize_with = "chrono::serde::ts_milliseconds::serialize",
        deserialize_with = "crate::models::deserializers::deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
    pub question: GeneratedQuestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl RecordMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }
}

impl HistoryRecord {
    pub fn new(
        id: String,
        suggested_name: String,
        created_at: DateTime<Utc>,
        question: GeneratedQuestion,
        metadata: RecordMetadata,
    ) -> Self {
        Self {
            id,
            suggested_name,
            // Stored as epoch millis; finer precision would not survive a reload
            created_at: created_at.trunc_subsecs(3),
            question,
            subject: metadata.subject,
            topic: metadata.topic,
            difficulty: metadata.difficulty,
        }
    }

    pub fn metadata(&self) -> RecordMetadata {
        RecordMetadata {
            subject: self.subject.clone(),
            topic: self.topic.clone(),
            difficulty: self.difficulty.clone(),
        }
    }

    /// Text matched by search: subject, topic, question text and options, space separated.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3 + self.question.options().len());
        parts.push(self.subject.as_deref().unwrap_or(""));
        parts.push(self.topic.as_deref().unwrap_or(""));
        parts.push(&self.question.question);
        parts.extend(self.question.options().iter().map(String::as_str));
        parts.join(" ")
    }
}
