use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

// Timestamps without an offset are wall-clock local time; the API emits them this way.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Formats an API timestamp as `Mar 1, 2024, 09:15 AM`.
///
/// Strings that do not parse render as [`INVALID_DATE`] instead of failing.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // Bare dates are midnight UTC.
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let utc = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(utc.with_timezone(&Local).naive_local())
}
