//! Attribution configuration and its string-typed raw counterpart.
//!
//! The typed [`AttributionConfig`] is what the engine consumes. [`RawConfig`]
//! is the shape an external form or query string supplies (all optional, all
//! text); resolving it never fails, malformed fields coerce to defaults.

use crate::timestamp::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Operator-filter sentinel meaning "all operators".
pub const ALL_OPERATORS: &str = "ALL";

/// Which events survive pre-walk filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    /// Keep every event; the walk tracks status continuously (default)
    #[default]
    None,
    /// Keep only status-change events. Deprecated simple variant: with the
    /// structural events filtered out, order sessions never open and the
    /// post-processing bracket rule marks all post-processing time uncredited.
    StatusLinesOnly,
}

/// Configuration for one attribution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Exact operator label, or [`ALL_OPERATORS`]
    pub operator_filter: String,

    /// Pre-walk event filtering mode
    pub status_filter: StatusFilter,

    /// Window start; first event's timestamp (post-filter) when absent
    pub window_start: Option<NaiveDateTime>,

    /// Window end; last event's timestamp (post-filter) when absent
    pub window_end: Option<NaiveDateTime>,

    /// Intervals shorter than this are dropped (strictly shorter; equal kept)
    pub min_gap_seconds: u64,

    /// In-progress gaps before an order at least this long get flagged;
    /// 0 disables the warning
    pub gap_warn_minutes: u64,

    /// Count time after order close as in-progress until the next order
    pub mode_b_enabled: bool,

    /// Keep only the last event when several share a timestamp
    pub dedupe_same_time: bool,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            operator_filter: ALL_OPERATORS.to_string(),
            status_filter: StatusFilter::None,
            window_start: None,
            window_end: None,
            min_gap_seconds: 0,
            gap_warn_minutes: 30,
            mode_b_enabled: true,
            dedupe_same_time: false,
        }
    }
}

impl AttributionConfig {
    /// Validate cross-field constraints.
    ///
    /// The engine itself never rejects a bad window (it degrades to the empty
    /// result); this is for callers that want to fail fast instead.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.window_start, self.window_end) {
            if end <= start {
                return Err(format!(
                    "window end {end} must be after window start {start}"
                ));
            }
        }
        Ok(())
    }
}

/// Configuration as an external collaborator supplies it: free-form strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// Operator label; empty or "ALL" means all operators
    pub operator: String,
    /// Deprecated simple variant toggle
    pub status_lines_only: bool,
    /// `YYYY-MM-DD HH:MM:SS` or empty
    pub window_start: String,
    /// `YYYY-MM-DD HH:MM:SS` or empty
    pub window_end: String,
    /// Non-negative integer as text
    pub min_gap_seconds: String,
    /// Non-negative integer as text
    pub gap_warn_minutes: String,
    pub mode_b_enabled: bool,
    pub dedupe_same_time: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            operator: String::new(),
            status_lines_only: false,
            window_start: String::new(),
            window_end: String::new(),
            min_gap_seconds: String::new(),
            gap_warn_minutes: String::new(),
            mode_b_enabled: true,
            dedupe_same_time: false,
        }
    }
}

impl RawConfig {
    /// Resolve into a typed configuration.
    ///
    /// Never fails: empty or malformed fields take the corresponding
    /// [`AttributionConfig::default`] value, malformed window timestamps
    /// resolve to "not supplied".
    pub fn resolve(&self) -> AttributionConfig {
        let defaults = AttributionConfig::default();
        let operator = self.operator.trim();
        AttributionConfig {
            operator_filter: if operator.is_empty() {
                ALL_OPERATORS.to_string()
            } else {
                operator.to_string()
            },
            status_filter: if self.status_lines_only {
                StatusFilter::StatusLinesOnly
            } else {
                StatusFilter::None
            },
            window_start: parse_timestamp(&self.window_start).ok(),
            window_end: parse_timestamp(&self.window_end).ok(),
            min_gap_seconds: parse_or(&self.min_gap_seconds, defaults.min_gap_seconds),
            gap_warn_minutes: parse_or(&self.gap_warn_minutes, defaults.gap_warn_minutes),
            mode_b_enabled: self.mode_b_enabled,
            dedupe_same_time: self.dedupe_same_time,
        }
    }
}

fn parse_or(raw: &str, default: u64) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    raw.parse().unwrap_or(default)
}
