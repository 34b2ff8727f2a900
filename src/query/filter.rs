use crate::models::HistoryRecord;

/// Conjunction of the three history filters. `None` fields do not constrain.
///
/// A blank (empty or whitespace-only) query is a pass-through, not "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub query: Option<String>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.active_query().is_none() && self.subject.is_none() && self.difficulty.is_none()
    }

    fn active_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }

    pub fn matches(&self, record: &HistoryRecord) -> bool {
        if let Some(query) = self.active_query()
            && !matches_query(record, &query.to_lowercase())
        {
            return false;
        }

        if let Some(subject) = &self.subject
            && record.subject.as_ref() != Some(subject)
        {
            return false;
        }

        if let Some(difficulty) = &self.difficulty
            && record.difficulty.as_ref() != Some(difficulty)
        {
            return false;
        }

        true
    }
}

/// Apply `filter` to a snapshot, preserving its order
pub fn apply_filter(records: Vec<HistoryRecord>, filter: &RecordFilter) -> Vec<HistoryRecord> {
    if filter.is_empty() {
        return records;
    }

    records.into_iter().filter(|record| filter.matches(record)).collect()
}

/// Case-insensitive substring search over subject, topic, question text and options
pub fn search(records: Vec<HistoryRecord>, query: &str) -> Vec<HistoryRecord> {
    apply_filter(records, &RecordFilter::new().query(query))
}

/// Exact match on subject; records without one never match
pub fn filter_by_subject(records: Vec<HistoryRecord>, subject: &str) -> Vec<HistoryRecord> {
    apply_filter(records, &RecordFilter::new().subject(subject))
}

/// Exact match on difficulty; records without one never match
pub fn filter_by_difficulty(records: Vec<HistoryRecord>, difficulty: &str) -> Vec<HistoryRecord> {
    apply_filter(records, &RecordFilter::new().difficulty(difficulty))
}

/// `lower_query` must already be lowercased
fn matches_query(record: &HistoryRecord, lower_query: &str) -> bool {
    record.searchable_text().to_lowercase().contains(lower_query)
}
