//! The history facade handed to the presentation layer.
//!
//! # Error Handling Strategy
//!
//! [`RecordStore`] reports failures as [`IndexError`](crate::error::IndexError).
//! This facade is the boundary where they stop:
//!
//! - **Reads** (`get_index`, `search`, `stats`, ...): a corrupted or unreadable
//!   index is logged and treated as empty
//! - **Mutations**: return `None`/`false` after logging, and the store keeps its
//!   last good state
//! - **Artifacts**: a sink failure is logged as a warning; the record it
//!   belongs to stays saved

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use super::artifact::{Artifact, ArtifactSink};
use crate::format::question_filename;
use crate::models::{GeneratedQuestion, HistoryRecord, RecordMetadata};
use crate::query::{IndexStats, RecordFilter, apply_filter, compute_stats};
use crate::storage::StorageMedium;
use crate::store::{RecordStore, generate_id};

/// Topic used for batch numbering when the batch has none
const DEFAULT_BATCH_TOPIC: &str = "Câu hỏi";

pub struct FileHistory<M: StorageMedium> {
    store: RecordStore<M>,
    sink: Option<Box<dyn ArtifactSink>>,
}

impl<M: StorageMedium> FileHistory<M> {
    pub fn new(store: RecordStore<M>) -> Self {
        Self { store, sink: None }
    }

    /// Emit a text document for every saved question, and index exports, to `sink`.
    pub fn with_sink(mut self, sink: impl ArtifactSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn store(&self) -> &RecordStore<M> {
        &self.store
    }

    pub fn into_store(self) -> RecordStore<M> {
        self.store
    }

    /// Save one question. Returns the new record id, or `None` if it was not persisted.
    pub fn save_question(
        &mut self,
        question: GeneratedQuestion,
        metadata: &RecordMetadata,
    ) -> Option<String> {
        self.save_question_at(question, metadata.clone(), None, Utc::now())
    }

    /// Save several questions with shared classification; returns the ids that were saved.
    ///
    /// With more than one question each topic is numbered ("Đạo hàm - Câu 2/3") and
    /// each suggested name carries the question's position.
    pub fn save_questions(
        &mut self,
        questions: Vec<GeneratedQuestion>,
        metadata: &RecordMetadata,
    ) -> Vec<String> {
        self.save_batch(questions, metadata, Utc::now)
    }

    /// [`save_questions`](Self::save_questions) with every record created at `created_at`.
    pub fn save_questions_at(
        &mut self,
        questions: Vec<GeneratedQuestion>,
        metadata: &RecordMetadata,
        created_at: DateTime<Utc>,
    ) -> Vec<String> {
        self.save_batch(questions, metadata, || created_at)
    }

    /// Save with an explicit creation time and optional zero-based batch position.
    pub fn save_question_at(
        &mut self,
        question: GeneratedQuestion,
        metadata: RecordMetadata,
        index: Option<usize>,
        created_at: DateTime<Utc>,
    ) -> Option<String> {
        let id = generate_id(created_at);
        let suggested_name = question_filename(&question, index, created_at);
        let record = HistoryRecord::new(id.clone(), suggested_name, created_at, question, metadata);
        let artifact = self.sink.is_some().then(|| Artifact::for_record(&record));

        if let Err(e) = self.store.insert(record) {
            error!(code = e.code(), error = %e, "failed to save question to history");
            return None;
        }

        if let Some(artifact) = artifact {
            self.emit(&artifact);
        }

        Some(id)
    }

    fn save_batch(
        &mut self,
        questions: Vec<GeneratedQuestion>,
        metadata: &RecordMetadata,
        mut clock: impl FnMut() -> DateTime<Utc>,
    ) -> Vec<String> {
        let total = questions.len();
        let mut ids = Vec::with_capacity(total);

        for (i, question) in questions.into_iter().enumerate() {
            let mut item_metadata = metadata.clone();
            let mut index = None;
            if total > 1 {
                let topic = metadata.topic.as_deref().unwrap_or(DEFAULT_BATCH_TOPIC);
                item_metadata.topic = Some(format!("{} - Câu {}/{}", topic, i + 1, total));
                index = Some(i);
            }

            if let Some(id) = self.save_question_at(question, item_metadata, index, clock()) {
                ids.push(id);
            }
        }

        if ids.len() < total {
            warn!(saved = ids.len(), total, "some questions in the batch were not saved");
        }
        ids
    }

    /// Current snapshot, newest first. Empty if the index cannot be read.
    pub fn get_index(&self) -> Vec<HistoryRecord> {
        match self.store.read_all() {
            Ok(records) => records,
            Err(e) => {
                error!(code = e.code(), error = %e, "failed to read history index");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<HistoryRecord> {
        self.get_index().into_iter().find(|record| record.id == id)
    }

    /// Substring search; a blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<HistoryRecord> {
        self.filter(&RecordFilter::new().query(query))
    }

    pub fn filter_by_subject(&self, subject: &str) -> Vec<HistoryRecord> {
        self.filter(&RecordFilter::new().subject(subject))
    }

    pub fn filter_by_difficulty(&self, difficulty: &str) -> Vec<HistoryRecord> {
        self.filter(&RecordFilter::new().difficulty(difficulty))
    }

    /// Combined search and field filters, evaluated on one fresh snapshot.
    pub fn filter(&self, filter: &RecordFilter) -> Vec<HistoryRecord> {
        apply_filter(self.get_index(), filter)
    }

    pub fn stats(&self) -> IndexStats {
        compute_stats(self.get_index(), self.store.config().recent_limit)
    }

    /// Returns whether a record was removed. Unknown ids and failures give `false`.
    pub fn delete_by_id(&mut self, id: &str) -> bool {
        match self.store.delete_by_id(id) {
            Ok(removed) => removed,
            Err(e) => {
                error!(code = e.code(), error = %e, %id, "failed to delete history record");
                false
            }
        }
    }

    pub fn clear(&mut self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(e) => {
                error!(code = e.code(), error = %e, "failed to clear history");
                false
            }
        }
    }

    /// Pretty JSON of the whole index, or `None` if it cannot be read.
    pub fn export_all(&self) -> Option<String> {
        match self.store.export_all() {
            Ok(export) => Some(export),
            Err(e) => {
                error!(code = e.code(), error = %e, "failed to export history index");
                None
            }
        }
    }

    /// Export the index to the sink as `file_history_index_<millis>.json`.
    /// Returns the emitted document name.
    pub fn emit_index_export(&mut self, now: DateTime<Utc>) -> Option<String> {
        let export = self.export_all()?;
        let artifact = Artifact::for_index_export(export, now);
        self.emit(&artifact).then_some(artifact.name)
    }

    /// Emit the rendered document of a stored record. Returns the emitted name.
    pub fn emit_record(&mut self, id: &str) -> Option<String> {
        let record = self.get(id)?;
        let artifact = Artifact::for_record(&record);
        self.emit(&artifact).then_some(artifact.name)
    }

    fn emit(&mut self, artifact: &Artifact) -> bool {
        let Some(sink) = self.sink.as_mut() else {
            debug!(name = %artifact.name, "no artifact sink configured");
            return false;
        };

        match sink.emit(artifact) {
            Ok(()) => {
                debug!(name = %artifact.name, bytes = artifact.contents.len(), "emitted artifact");
                true
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "failed to emit artifact");
                false
            }
        }
    }
}
