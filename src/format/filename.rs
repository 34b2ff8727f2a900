use chrono::{DateTime, Utc};

use crate::models::GeneratedQuestion;

/// Characters of question text considered for a file name
const NAME_PREFIX_CHARS: usize = 50;

const FALLBACK_NAME: &str = "question";

/// Prefix of the exported index document name
pub const INDEX_EXPORT_PREFIX: &str = "file_history_index";

/// File name for one exported question: `<sanitized text>[_<n>]_<millis>.txt`.
///
/// `index` is zero-based; the suffix shows it one-based.
pub fn question_filename(
    question: &GeneratedQuestion,
    index: Option<usize>,
    created_at: DateTime<Utc>,
) -> String {
    let mut name = sanitize_name(&question.question);
    if name.is_empty() {
        name = FALLBACK_NAME.to_string();
    }

    let index_suffix = index.map(|i| format!("_{}", i + 1)).unwrap_or_default();
    format!("{}{}_{}.txt", name, index_suffix, created_at.timestamp_millis())
}

/// File name for an exported index: `file_history_index_<millis>.json`
pub fn index_export_filename(now: DateTime<Utc>) -> String {
    format!("{}_{}.json", INDEX_EXPORT_PREFIX, now.timestamp_millis())
}

/// Keep ASCII letters and digits, whitespace and Latin letters with diacritics;
/// collapse whitespace runs to `_` and lowercase.
fn sanitize_name(text: &str) -> String {
    let kept: String =
        text.chars().take(NAME_PREFIX_CHARS).filter(|&c| is_name_char(c)).collect();

    let mut name = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    name
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || ('\u{00C0}'..='\u{024F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}
