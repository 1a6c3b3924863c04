//! Shared formatting utilities for the UI layer.

use chrono::{NaiveDate, Timelike};
use shared_types::{normalize_date, WIRE_DATE_FORMAT};

/// Format a date in any accepted input shape as "Mar 10, 2024".
///
/// Values that do not parse are returned unchanged.
pub fn format_date_human(date_str: &str) -> String {
    normalize_date(date_str)
        .ok()
        .and_then(|wire| NaiveDate::parse_from_str(&wire, WIRE_DATE_FORMAT).ok())
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

/// Greeting for the dashboard header, by local hour.
pub fn greeting(now: impl Timelike) -> &'static str {
    match now.hour() {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}
