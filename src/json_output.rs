//! JSON output format for attribution results
//!
//! A serializable mirror of [`AttributionResult`] for machine consumers.
//! Totals are emitted as a sorted array so repeated runs over the same input
//! produce byte-identical documents.

use serde::{Deserialize, Serialize};

use crate::attribution::{AttributionResult, Interval};
use crate::report::{percent_of_window, sorted_totals};
use crate::timestamp::format_timestamp;

/// One status row of the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTotal {
    pub status: String,
    pub duration_ms: i64,
    /// Share of the window, 0-100
    pub percent: f64,
}

/// One emitted interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonInterval {
    /// `YYYY-MM-DD HH:MM:SS`
    pub from: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub to: String,
    /// Action of the event that opened the interval
    pub action: String,
    /// Attributed status, or "(none)"
    pub status: String,
    pub duration_ms: i64,
    pub credited: bool,
    pub large_gap_warning: bool,
}

/// Top-level report document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Resolved window bounds; absent when no valid window was formed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_end: Option<String>,
    pub used_event_count: usize,
    pub totals: Vec<JsonTotal>,
    pub intervals: Vec<JsonInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl JsonReport {
    /// Build the document from an attribution result plus parser warnings.
    pub fn from_result(result: &AttributionResult, warnings: &[String]) -> Self {
        let totals = sorted_totals(result)
            .into_iter()
            .map(|(status, duration_ms)| JsonTotal {
                percent: percent_of_window(result, duration_ms),
                status,
                duration_ms,
            })
            .collect();

        let intervals = result.intervals.iter().map(JsonInterval::from).collect();

        Self {
            window_start: result.window_start.map(format_timestamp),
            window_end: result.window_end.map(format_timestamp),
            used_event_count: result.used_event_count,
            totals,
            intervals,
            warnings: warnings.to_vec(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Interval> for JsonInterval {
    fn from(interval: &Interval) -> Self {
        Self {
            from: format_timestamp(interval.from),
            to: format_timestamp(interval.to),
            action: interval.triggering_action.clone(),
            status: interval.attributed_status.clone(),
            duration_ms: interval.duration_ms,
            credited: interval.credited,
            large_gap_warning: interval.large_gap_warning,
        }
    }
}
