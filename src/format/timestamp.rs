use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a creation time relative to the current local time:
/// - Same calendar day: "today 14:05"
/// - Previous calendar day: "yesterday 09:30"
/// - Up to a week back: "3 days ago"
/// - Older (or in the future beyond today): "05/03/2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Local::now())
}

/// [`format_timestamp`] for epoch milliseconds. Out-of-range values render as an empty string.
pub fn format_timestamp_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map(|ts| format_timestamp(&ts)).unwrap_or_default()
}

/// Same as [`format_timestamp`] with an explicit "now"; calendar days are taken in `now`'s zone.
pub fn format_timestamp_at<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let days = (now.date_naive() - local.date_naive()).num_days();

    match days {
        0 => format!("today {}", local.format("%H:%M")),
        1 => format!("yesterday {}", local.format("%H:%M")),
        2..=6 => format!("{} days ago", days),
        _ => local.format("%d/%m/%Y").to_string(),
    }
}
