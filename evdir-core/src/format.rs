//! Display formatting for event times.
//!
//! Inputs are normalized millisecond timestamps. Out-of-range values render
//! as "unknown time" instead of failing.

use chrono::{DateTime, Local, TimeZone, Utc};

const UNKNOWN: &str = "unknown time";

fn to_zone<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(tz))
}

/// e.g. "Mar 5, 2026"
pub fn format_date_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    to_zone(millis, tz)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// e.g. "3:05 PM"
pub fn format_time_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    to_zone(millis, tz)
        .map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// e.g. "Mar 5, 2026 • 3:00 PM - 4:30 PM"
pub fn format_date_range_in<Tz: TimeZone>(start: i64, end: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} • {} - {}",
        format_date_in(start, tz),
        format_time_in(start, tz),
        format_time_in(end, tz)
    )
}

pub fn format_date(millis: i64) -> String {
    format_date_in(millis, &Local)
}

pub fn format_time(millis: i64) -> String {
    format_time_in(millis, &Local)
}

pub fn format_date_range(start: i64, end: i64) -> String {
    format_date_range_in(start, end, &Local)
}
