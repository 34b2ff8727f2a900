use chrono::{DateTime, Utc};
use uuid::Uuid;

const RANDOM_DIGITS: usize = 11;

/// Generates a record id: base-36 creation millis followed by base-36 random digits.
///
/// Ids created in later milliseconds sort after earlier ones while the time
/// component keeps the same width (until the year 5188). Collisions are not
/// checked; the random part carries ~56 bits from a v4 UUID.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let millis = u128::try_from(now.timestamp_millis()).unwrap_or_default();
    let mut random = to_base36(Uuid::new_v4().as_u128());
    random.truncate(RANDOM_DIGITS);
    format!("{}{}", to_base36(millis), random)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
