//! Wall-clock timestamp parsing and duration formatting.
//!
//! Timestamps are local wall-clock instants with second precision and no
//! timezone attached: calendar fields map directly to a `NaiveDateTime`, no
//! offset or DST correction is applied.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Error for strings that are not valid `YYYY-MM-DD HH:MM:SS` timestamps
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The string does not have the `YYYY-MM-DD HH:MM:SS` shape
    #[error("not a YYYY-MM-DD HH:MM:SS timestamp: {0:?}")]
    Shape(String),
    /// The shape matched but the calendar fields are out of range
    #[error("calendar fields out of range: {0:?}")]
    OutOfRange(String),
}

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Space or T between date and time, nothing else accepted.
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[ T](\d{2}):(\d{2}):(\d{2})$")
            .expect("timestamp regex")
    })
}

/// Parse a `YYYY-MM-DD HH:MM:SS` (or `T`-separated) local wall-clock timestamp.
///
/// Calendar validity is enforced: month 13 or second 61 is rejected as
/// `OutOfRange`, not silently wrapped.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    let s = s.trim();
    let caps = timestamp_re()
        .captures(s)
        .ok_or_else(|| TimestampError::Shape(s.to_string()))?;

    // Captures are all-digit by construction; the only failure left is range.
    let field = |i: usize| caps[i].parse::<u32>().expect("digit capture");

    let date = NaiveDate::from_ymd_opt(field(1) as i32, field(2), field(3))
        .ok_or_else(|| TimestampError::OutOfRange(s.to_string()))?;
    date.and_hms_opt(field(4), field(5), field(6))
        .ok_or_else(|| TimestampError::OutOfRange(s.to_string()))
}

/// Check whether a field looks like a timestamp without keeping the value.
pub fn is_timestamp(s: &str) -> bool {
    parse_timestamp(s).is_ok()
}

/// Render an instant back in the canonical `YYYY-MM-DD HH:MM:SS` form.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a millisecond duration as `HH:MM:SS`.
///
/// Hours grow past two digits for multi-day durations instead of wrapping.
pub fn format_duration_ms(ms: i64) -> String {
    let total_sec = ms.max(0) / 1000;
    let h = total_sec / 3600;
    let m = (total_sec % 3600) / 60;
    let s = total_sec % 60;
    format!("{h:02}:{m:02}:{s:02}")
}
