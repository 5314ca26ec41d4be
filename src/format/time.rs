//! Relative timestamps ("5s ago", "2.1m ago", "3d ago")

use chrono::{DateTime, NaiveDateTime, Utc};

/// `created_at` layouts used by the provider: timelines, then search
const CREATED_AT_FORMATS: [&str; 2] = ["%a %b %d %H:%M:%S +0000 %Y", "%a, %d %b %Y %H:%M:%S +0000"];

/// Parse a provider `created_at` string as UTC
pub fn parse_created_at(s: &str) -> Option<DateTime<Utc>> {
    CREATED_AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Time since `s`, relative to the current time
pub fn relative_time(s: &str) -> String {
    relative_time_at(s, Utc::now())
}

/// Time since `s`, relative to `now`
///
/// Unparseable input is returned unchanged.
pub fn relative_time_at(s: &str, now: DateTime<Utc>) -> String {
    match parse_created_at(s) {
        Some(then) => format_elapsed((now - then).num_seconds()),
        None => s.to_string(),
    }
}

/// Render an elapsed number of seconds
///
/// The sign is ignored, so clock drift never reads as "in the future".
/// Below two minutes the exact second count is kept.
pub fn format_elapsed(seconds: i64) -> String {
    let secs = seconds.unsigned_abs();
    let days = secs / 86_400;

    if days > 0 {
        format!("{days}d ago")
    } else if secs >= 3_600 {
        format!("{:.1}h ago", secs as f64 / 3_600.0)
    } else if secs >= 120 {
        format!("{:.1}m ago", secs as f64 / 60.0)
    } else {
        format!("{secs}s ago")
    }
}
