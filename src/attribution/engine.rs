//! The interval walk: chronologically ordered events to per-status durations.
//!
//! State machine per walk step: an order-opened action starts an order
//! session, order-closed ends it (and, in mode B, reassigns the running
//! status to in-progress), a status action overrides the running status.
//! The interval between consecutive events is clipped to the window and
//! attributed to the running status at its start.

use crate::attribution::config::{AttributionConfig, StatusFilter, ALL_OPERATORS};
use crate::event::{
    ActionKind, Event, IN_PROGRESS_LABEL, POST_PROCESSING_LABEL, UNATTRIBUTED_LABEL,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

/// One emitted slice of the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    /// Action of the event that opened this interval
    pub triggering_action: String,
    /// Status the duration belongs to, or the "(none)" sentinel
    pub attributed_status: String,
    pub duration_ms: i64,
    /// Whether the duration is counted in totals
    pub credited: bool,
    /// Suspiciously long idle gap right before the next order
    pub large_gap_warning: bool,
}

/// Milliseconds accumulated per status label.
pub type Totals = HashMap<String, i64>;

/// Full result of one attribution run.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionResult {
    pub totals: Totals,
    pub intervals: Vec<Interval>,
    /// Resolved window bounds; `None` when no valid window could be formed
    pub window_start: Option<NaiveDateTime>,
    pub window_end: Option<NaiveDateTime>,
    /// Events surviving the filters, before windowing
    pub used_event_count: usize,
}

impl AttributionResult {
    fn empty(used_event_count: usize) -> Self {
        Self {
            totals: Totals::new(),
            intervals: Vec::new(),
            window_start: None,
            window_end: None,
            used_event_count,
        }
    }

    /// Window length in milliseconds; `None` without a valid window.
    pub fn window_ms(&self) -> Option<i64> {
        match (self.window_start, self.window_end) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}

/// Attribute elapsed time between events to status labels.
///
/// A total function: malformed or insufficient input degrades to the empty
/// result, never an error. Recomputes everything from scratch on every call;
/// no state survives between runs.
pub fn attribute(events: &[Event], config: &AttributionConfig) -> AttributionResult {
    let mut used: Vec<Event> = events
        .iter()
        .filter(|e| {
            config.operator_filter == ALL_OPERATORS || e.operator == config.operator_filter
        })
        .cloned()
        .collect();

    if config.status_filter == StatusFilter::StatusLinesOnly {
        used.retain(|e| e.kind == ActionKind::StatusChange);
    }

    // Stable: same-timestamp events keep their input order.
    used.sort_by_key(|e| e.timestamp);

    if config.dedupe_same_time {
        used = dedupe_same_time(used);
    }

    let used_event_count = used.len();

    let window_start = config
        .window_start
        .or_else(|| used.first().map(|e| e.timestamp));
    let window_end = config
        .window_end
        .or_else(|| used.last().map(|e| e.timestamp));
    let (start, end) = match (window_start, window_end) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => {
            debug!("no valid window, returning empty result");
            return AttributionResult::empty(used_event_count);
        }
    };

    let mut result = AttributionResult {
        totals: Totals::new(),
        intervals: Vec::new(),
        window_start: Some(start),
        window_end: Some(end),
        used_event_count,
    };
    if used.len() < 2 {
        // A valid window but nothing to pair up: echo the bounds only.
        return result;
    }

    let min_gap_ms = config.min_gap_seconds as i64 * 1_000;
    let warn_ms = config.gap_warn_minutes as i64 * 60_000;

    // Running state. Pairs clipped out of the window still advance it, which
    // doubles as priming for a manual window that starts mid-sequence.
    let mut current_status: Option<String> = None;
    let mut in_order_session = false;

    for pair in used.windows(2) {
        let (cur, next) = (&pair[0], &pair[1]);

        match cur.kind {
            ActionKind::OrderOpened => in_order_session = true,
            ActionKind::OrderClosed => {
                in_order_session = false;
                if config.mode_b_enabled {
                    // Until the next order opens, the operator counts as
                    // in-progress rather than post-processing.
                    current_status = Some(IN_PROGRESS_LABEL.to_string());
                }
            }
            ActionKind::StatusChange => current_status = Some(cur.action.clone()),
            ActionKind::Other => {}
        }

        // Clip [cur, next) to the window; clip before measuring.
        let from = cur.timestamp.max(start);
        let to = next.timestamp.min(end);
        if to <= from {
            continue;
        }

        let duration_ms = (to - from).num_milliseconds();
        if duration_ms < min_gap_ms {
            continue;
        }

        // Post-processing only counts inside an open order session.
        let credited = match current_status.as_deref() {
            None => false,
            Some(status) => status != POST_PROCESSING_LABEL || in_order_session,
        };

        let large_gap_warning = warn_ms > 0
            && current_status.as_deref() == Some(IN_PROGRESS_LABEL)
            && next.kind == ActionKind::OrderOpened
            && duration_ms >= warn_ms;

        let attributed_status = current_status
            .clone()
            .unwrap_or_else(|| UNATTRIBUTED_LABEL.to_string());
        if credited {
            *result.totals.entry(attributed_status.clone()).or_default() += duration_ms;
        }
        result.intervals.push(Interval {
            from,
            to,
            triggering_action: cur.action.clone(),
            attributed_status,
            duration_ms,
            credited,
            large_gap_warning,
        });
    }

    result
}

/// Keep only the last event of each identical timestamp, preserving order.
///
/// Input must already be sorted; equal timestamps are adjacent, so last-wins
/// is an in-place replacement.
fn dedupe_same_time(sorted: Vec<Event>) -> Vec<Event> {
    let mut deduped: Vec<Event> = Vec::with_capacity(sorted.len());
    for event in sorted {
        if deduped
            .last()
            .is_some_and(|prev| prev.timestamp == event.timestamp)
        {
            let last_idx = deduped.len() - 1;
            deduped[last_idx] = event;
        } else {
            deduped.push(event);
        }
    }
    deduped
}
