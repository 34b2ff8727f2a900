use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::HistoryRecord;

/// Aggregate view of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_files: usize,
    /// Count per subject value; only subjects that occur are present
    pub subjects: BTreeMap<String, usize>,
    /// Count per difficulty value; only difficulties that occur are present
    pub difficulties: BTreeMap<String, usize>,
    pub recent_files: Vec<HistoryRecord>,
}

/// Derives every figure from the same snapshot, so they always agree.
pub fn compute_stats(records: Vec<HistoryRecord>, recent_limit: usize) -> IndexStats {
    let mut subjects = BTreeMap::new();
    let mut difficulties = BTreeMap::new();

    for record in &records {
        // Empty values count as unset
        if let Some(subject) = record.subject.as_ref().filter(|s| !s.is_empty()) {
            *subjects.entry(subject.clone()).or_insert(0) += 1;
        }
        if let Some(difficulty) = record.difficulty.as_ref().filter(|d| !d.is_empty()) {
            *difficulties.entry(difficulty.clone()).or_insert(0) += 1;
        }
    }

    let total_files = records.len();
    let mut recent_files = records;
    recent_files.truncate(recent_limit);

    IndexStats { total_files, subjects, difficulties, recent_files }
}
