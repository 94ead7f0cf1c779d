//! Plain-text rendering of an attribution result.
//!
//! Presentation only: fixed-width tables, `HH:MM:SS` durations, no locale
//! logic. The separator style follows the rest of the tooling output.

use crate::attribution::AttributionResult;
use crate::timestamp::{format_duration_ms, format_timestamp};

const RULE: &str = "─────────────────────────────────────────────────────────";

/// Totals entries sorted for display: longest first, label as tie-break.
///
/// `Totals` is a hash map; every renderer goes through this to keep output
/// deterministic across runs.
pub fn sorted_totals(result: &AttributionResult) -> Vec<(String, i64)> {
    let mut entries: Vec<(String, i64)> = result
        .totals
        .iter()
        .map(|(label, ms)| (label.clone(), *ms))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Percentage of the window a duration covers; 0 without a valid window.
pub fn percent_of_window(result: &AttributionResult, duration_ms: i64) -> f64 {
    match result.window_ms() {
        Some(window_ms) if window_ms > 0 => duration_ms as f64 / window_ms as f64 * 100.0,
        _ => 0.0,
    }
}

/// Render the full report: warnings, window, summary table, interval listing.
pub fn render_text(result: &AttributionResult, warnings: &[String]) -> String {
    let mut out = String::new();
    for warning in warnings {
        out.push_str(&format!("warning: {warning}\n"));
    }

    let (Some(start), Some(end)) = (result.window_start, result.window_end) else {
        out.push_str("No valid calculation window (check dates/format).\n");
        return out;
    };
    let window_ms = (end - start).num_milliseconds();

    out.push_str(&format!(
        "Window: {} -> {} ({})\n",
        format_timestamp(start),
        format_timestamp(end),
        format_duration_ms(window_ms)
    ));
    out.push_str(&format!("Events used: {}\n\n", result.used_event_count));

    let totals = sorted_totals(result);
    if totals.is_empty() {
        out.push_str("No credited intervals in the window.\n");
    } else {
        out.push_str(&format!(
            "{:<34} {:>9} {:>8}\n",
            "Status", "Duration", "% window"
        ));
        out.push_str(RULE);
        out.push('\n');
        for (status, ms) in &totals {
            out.push_str(&format!(
                "{:<34} {:>9} {:>7.1}%\n",
                status,
                format_duration_ms(*ms),
                percent_of_window(result, *ms)
            ));
        }
    }

    if !result.intervals.is_empty() {
        out.push_str("\nIntervals:\n");
        out.push_str(RULE);
        out.push('\n');
        for interval in &result.intervals {
            // Uncredited time is marked with '-', flagged gaps with '!'.
            let credit_marker = if interval.credited { ' ' } else { '-' };
            let warn_marker = if interval.large_gap_warning { " !" } else { "" };
            out.push_str(&format!(
                "{} -> {}  {:<34} {:>9} {}{}\n",
                format_timestamp(interval.from),
                format_timestamp(interval.to),
                interval.attributed_status,
                format_duration_ms(interval.duration_ms),
                credit_marker,
                warn_marker
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::{attribute, AttributionConfig};
    use crate::event::{classify_action, Event};
    use crate::timestamp::parse_timestamp;

    fn ev(action: &str, ts: &str) -> Event {
        Event {
            record_id: String::new(),
            action: action.to_string(),
            kind: classify_action(action),
            operator: "OpA".to_string(),
            order_id: String::new(),
            timestamp: parse_timestamp(ts).unwrap(),
        }
    }

    fn sample_result() -> AttributionResult {
        let events = vec![
            ev("Статус в работе", "2024-01-01 10:00:00"),
            ev("Статус перерыв", "2024-01-01 10:45:00"),
            ev("Статус в работе", "2024-01-01 11:00:00"),
        ];
        attribute(&events, &AttributionConfig::default())
    }

    #[test]
    fn test_sorted_totals_longest_first() {
        let totals = sorted_totals(&sample_result());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].0, "Статус в работе");
        assert_eq!(totals[0].1, 2_700_000);
        assert_eq!(totals[1].1, 900_000);
    }

    #[test]
    fn test_sorted_totals_label_tiebreak() {
        let events = vec![
            ev("Статус б", "2024-01-01 10:00:00"),
            ev("Статус а", "2024-01-01 10:30:00"),
            ev("Вход", "2024-01-01 11:00:00"),
        ];
        let result = attribute(&events, &AttributionConfig::default());
        let totals = sorted_totals(&result);
        // Equal 30-minute durations: lexicographic label order decides.
        assert_eq!(totals[0].0, "Статус а");
        assert_eq!(totals[1].0, "Статус б");
    }

    #[test]
    fn test_render_contains_window_and_rows() {
        let text = render_text(&sample_result(), &[]);
        assert!(text.contains("Window: 2024-01-01 10:00:00 -> 2024-01-01 11:00:00 (01:00:00)"));
        assert!(text.contains("Events used: 3"));
        assert!(text.contains("Статус в работе"));
        assert!(text.contains("00:45:00"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn test_render_without_window() {
        let result = attribute(&[], &AttributionConfig::default());
        let text = render_text(&result, &["no lines to process".to_string()]);
        assert!(text.contains("warning: no lines to process"));
        assert!(text.contains("No valid calculation window"));
    }

    #[test]
    fn test_render_marks_uncredited() {
        let events = vec![
            ev("Открытие заказа", "2024-01-01 10:00:00"),
            ev("Закрытие заказа", "2024-01-01 10:30:00"),
            ev("Статус в работе", "2024-01-01 11:00:00"),
        ];
        let result = attribute(&events, &AttributionConfig::default());
        let text = render_text(&result, &[]);
        // The (none) interval shows up in the listing but not the summary.
        assert!(text.contains("(none)"));
        assert!(text.contains("00:30:00 -"));
        assert!(!sorted_totals(&result).iter().any(|(label, _)| label == "(none)"));
    }

    #[test]
    fn test_percent_of_window_empty() {
        let result = attribute(&[], &AttributionConfig::default());
        assert_eq!(percent_of_window(&result, 1000), 0.0);
    }
}
