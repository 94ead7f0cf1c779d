//! Tolerant parsing of pasted status-history tables.
//!
//! Input is whatever the clipboard produced: tab-delimited rows, rows whose
//! tabs collapsed into space runs, pagination chrome, a header line, page
//! numbers. Everything that is not a data row is dropped silently; the only
//! surfaced diagnostics are aggregate warnings.

use crate::event::{classify_action, Event};
use crate::layout;
use crate::noise::NoiseRules;
use crate::timestamp::{is_timestamp, parse_timestamp};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Warning when the input had no usable lines at all.
pub const EMPTY_INPUT_WARNING: &str = "no lines to process";

/// Warning when no line carried a valid timestamp.
pub const NO_ROWS_WARNING: &str =
    "no rows with a valid YYYY-MM-DD HH:MM:SS timestamp were found";

/// Result of one parse call: events in input order plus aggregate warnings.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub events: Vec<Event>,
    pub warnings: Vec<String>,
}

fn space_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("space-run regex"))
}

/// Recover tab structure when copy-paste flattened tabs into space runs.
///
/// Lines that still contain a tab are left alone; single spaces inside cell
/// values (multi-word operator names) survive either way.
fn normalize_delimiters(line: &str) -> String {
    if line.contains('\t') {
        return line.to_string();
    }
    space_run_re().replace_all(line, "\t").into_owned()
}

/// Tolerant parser for pasted status-history tables.
#[derive(Debug)]
pub struct Parser {
    noise: NoiseRules,
    header_re: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(NoiseRules::default())
    }
}

impl Parser {
    pub fn new(noise: NoiseRules) -> Self {
        // The header looks like "Id  Действие  Оператор  Заказ  Дата" in any
        // delimiter style.
        let header_re =
            Regex::new(r"(?i)id\s+действие\s+оператор\s+заказ\s+дата").expect("header regex");
        Self { noise, header_re }
    }

    /// Parse pasted text into events (input order preserved) plus warnings.
    ///
    /// Never fails: malformed lines are skipped, and the worst case is an
    /// empty event list with one aggregate warning.
    pub fn parse(&self, raw: &str) -> ParseOutcome {
        let filtered: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter(|l| !self.noise.is_noise(l))
            .collect();

        if filtered.is_empty() {
            return ParseOutcome {
                events: Vec::new(),
                warnings: vec![EMPTY_INPUT_WARNING.to_string()],
            };
        }

        // Data starts after the header line when one is present.
        let content = match filtered
            .iter()
            .position(|l| self.header_re.is_match(&l.replace('\t', " ")))
        {
            Some(idx) => &filtered[idx + 1..],
            None => &filtered[..],
        };

        let mut events = Vec::new();
        let mut dropped = 0usize;
        for line in content {
            match self.parse_line(line) {
                Some(event) => events.push(event),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "skipped lines without a parseable timestamp");
        }

        let mut warnings = Vec::new();
        if events.is_empty() {
            warnings.push(NO_ROWS_WARNING.to_string());
        }
        ParseOutcome { events, warnings }
    }

    fn parse_line(&self, line: &str) -> Option<Event> {
        let line = normalize_delimiters(line);
        let fields: Vec<&str> = line
            .split('\t')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            return None;
        }

        // Prefer the last field that parses as a timestamp; if none does, the
        // last field is the candidate and the line stands or falls with it.
        let ts_idx = fields
            .iter()
            .rposition(|f| is_timestamp(f))
            .unwrap_or(fields.len() - 1);
        let timestamp = parse_timestamp(fields[ts_idx]).ok()?;

        let row = layout::extract_row(&fields[..ts_idx]);
        Some(Event {
            record_id: row.record_id,
            kind: classify_action(&row.action),
            action: row.action,
            operator: row.operator,
            order_id: row.order_id,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ActionKind;
    use crate::timestamp::format_timestamp;

    fn parse(raw: &str) -> ParseOutcome {
        Parser::default().parse(raw)
    }

    const DEMO: &str = "\
Id\tДействие\tОператор\tЗаказ\tДата
1474424\tСтатус пост-обработка\t2964-Мебагишвили Теона 5072 ГП\t\t2026-02-13 19:55:34
1474422\tОткрытие заказа\t2964-Мебагишвили Теона 5072 ГП\t393470\t2026-02-13 19:46:53
1474409\tСтатус в работе\t2964-Мебагишвили Теона 5072 ГП\t\t2026-02-13 19:20:28
1474408\tЗакрытие заказа\t2964-Мебагишвили Теона 5072 ГП\t393441\t2026-02-13 19:20:20
1472234\tСтатус в работе\t2964-Мебагишвили Теона 5072 ГП\t\t2026-02-13 11:52:11";

    #[test]
    fn test_parse_demo_table() {
        let outcome = parse(DEMO);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.events.len(), 5);

        let first = &outcome.events[0];
        assert_eq!(first.record_id, "1474424");
        assert_eq!(first.action, "Статус пост-обработка");
        assert_eq!(first.kind, ActionKind::StatusChange);
        assert_eq!(first.operator, "2964-Мебагишвили Теона 5072 ГП");
        assert_eq!(first.order_id, "");
        assert_eq!(format_timestamp(first.timestamp), "2026-02-13 19:55:34");

        let open = &outcome.events[1];
        assert_eq!(open.kind, ActionKind::OrderOpened);
        assert_eq!(open.order_id, "393470");
    }

    #[test]
    fn test_input_order_preserved() {
        // The demo paste is newest-first; the parser does not sort.
        let outcome = parse(DEMO);
        assert!(outcome.events[0].timestamp > outcome.events[4].timestamp);
    }

    #[test]
    fn test_header_and_preceding_lines_dropped() {
        let raw = "\
1\tСтатус мусор\tOpX\t\t2020-05-05 05:05:05
Id Действие Оператор Заказ Дата
2\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00";
        let outcome = parse(raw);
        // Everything up to and including the header is discarded.
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].operator, "OpA");
    }

    #[test]
    fn test_space_runs_recovered_as_tabs() {
        let raw = "1474409   Статус в работе   2964-Мебагишвили Теона   \
                   2026-02-13 19:20:28";
        let outcome = parse(raw);
        assert_eq!(outcome.events.len(), 1);
        let event = &outcome.events[0];
        assert_eq!(event.record_id, "1474409");
        assert_eq!(event.action, "Статус в работе");
        assert_eq!(event.operator, "2964-Мебагишвили Теона");
    }

    #[test]
    fn test_noise_lines_dropped() {
        let raw = "\
Показать 10 записей
Записей с 1 до 10 из 53
Предыдущая
1
5\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00
Следующая";
        let outcome = parse(raw);
        assert_eq!(outcome.events.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_lines_without_timestamp_dropped_silently() {
        let raw = "\
это просто мусорная строка без даты
5\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00";
        let outcome = parse(raw);
        assert_eq!(outcome.events.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_timestamp_located_anywhere_last_wins() {
        // Two timestamp-shaped fields: the later one is the row's instant.
        let raw = "5\tСтатус в работе\t2024-01-01 09:00:00\t2024-01-01 10:00:00";
        let outcome = parse(raw);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(
            format_timestamp(outcome.events[0].timestamp),
            "2024-01-01 10:00:00"
        );
        // The earlier timestamp-shaped field folds into the operator slot.
        assert_eq!(outcome.events[0].operator, "2024-01-01 09:00:00");
    }

    #[test]
    fn test_timestamp_only_line_kept_as_labelless_event() {
        let outcome = parse("2024-01-01 10:00:00");
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].action, "");
        assert_eq!(outcome.events[0].kind, ActionKind::Other);
    }

    #[test]
    fn test_empty_input_warning() {
        let outcome = parse("");
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.warnings, vec![EMPTY_INPUT_WARNING.to_string()]);

        let outcome = parse("\n   \n\n");
        assert_eq!(outcome.warnings, vec![EMPTY_INPUT_WARNING.to_string()]);
    }

    #[test]
    fn test_no_valid_rows_warning() {
        let outcome = parse("какой-то текст\nещё текст без даты");
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.warnings, vec![NO_ROWS_WARNING.to_string()]);
    }

    #[test]
    fn test_crlf_input() {
        let raw = "5\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00\r\n\
                   6\tЗакрытие заказа\tOpA\t77\t2024-01-01 10:30:00\r\n";
        let outcome = parse(raw);
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[1].kind, ActionKind::OrderClosed);
    }

    #[test]
    fn test_empty_order_cell_between_tabs() {
        // Double tab where the order cell is empty must not shift columns.
        let raw = "5\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00";
        let outcome = parse(raw);
        let event = &outcome.events[0];
        assert_eq!(event.operator, "OpA");
        assert_eq!(event.order_id, "");
    }

    #[test]
    fn test_custom_noise_rules() {
        let mut rules = NoiseRules::none();
        rules.exact.push("opa".to_string());
        let parser = Parser::new(rules);
        // "Предыдущая" is no longer noise without the default pack, but it
        // has no timestamp, so it is dropped as a non-data line anyway.
        let outcome = parser.parse("5\tСтатус в работе\tOpA\t\t2024-01-01 10:00:00");
        assert_eq!(outcome.events.len(), 1);
    }
}
