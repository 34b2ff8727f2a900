//! Query parser for the history search box.
//!
//! # Syntax
//!
//! ```text
//! query := (field_filter | word)*
//! field_filter := field_name:value | field_name:"quoted value"
//! field_name := subject | difficulty (case-insensitive)
//! ```
//!
//! Field filters set exact-match constraints; a later filter on the same field
//! replaces an earlier one and the value `all` removes the constraint. Every
//! other word is free text, re-joined with single spaces into the search query.
//!
//! # Examples
//!
//! ```rust
//! # use question_history::query::parse_query;
//! let filter = parse_query("subject:toan difficulty:easy đạo hàm").unwrap();
//! assert_eq!(filter.subject.as_deref(), Some("toan"));
//! assert_eq!(filter.query.as_deref(), Some("đạo hàm"));
//!
//! let filter = parse_query("subject:\"Tiếng Anh\"").unwrap();
//! assert_eq!(filter.subject.as_deref(), Some("Tiếng Anh"));
//! ```

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Result, anyhow};

use super::filter::RecordFilter;

/// Value that clears a field filter, as offered by the history dialog's selects
const ALL_VALUES: &str = "all";

pub fn parse_query(input: &str) -> Result<RecordFilter> {
    let mut filter = RecordFilter::new();
    let mut words: Vec<String> = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);
        let Some((field, value)) = word.split_once(':') else {
            words.push(word);
            continue;
        };

        let field = field.to_lowercase();
        if field != "subject" && field != "difficulty" {
            words.push(word);
            continue;
        }

        let value = if value.starts_with('"') {
            read_quoted_value(&mut chars, value)?
        } else {
            value.to_string()
        };

        if value.is_empty() {
            return Err(anyhow!("Missing value for filter: {}:", field));
        }

        let value = (value != ALL_VALUES).then_some(value);
        if field == "subject" {
            filter.subject = value;
        } else {
            filter.difficulty = value;
        }
    }

    if !words.is_empty() {
        filter.query = Some(words.join(" "));
    }

    Ok(filter)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Complete a quoted value whose opening part (starting with `"`) was already read
fn read_quoted_value(chars: &mut Peekable<Chars>, started: &str) -> Result<String> {
    let mut value = started[1..].to_string();

    if let Some(stripped) = value.strip_suffix('"') {
        return Ok(stripped.to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted value: \"{}", value))
}
