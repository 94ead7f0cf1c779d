//! Event model and action-label classification.
//!
//! Every pasted row becomes one immutable [`Event`]. The action label is
//! classified exactly once here; the attribution walk dispatches on
//! [`ActionKind`] instead of re-comparing strings.

use chrono::NaiveDateTime;

/// Exact label of the order-opened structural action.
pub const ORDER_OPENED_LABEL: &str = "Открытие заказа";

/// Exact label of the order-closed structural action.
pub const ORDER_CLOSED_LABEL: &str = "Закрытие заказа";

/// Status label the engine assigns after order closure in mode B.
pub const IN_PROGRESS_LABEL: &str = "Статус в работе";

/// Status label for after-call work; credited only inside an order session.
pub const POST_PROCESSING_LABEL: &str = "Статус пост-обработка";

/// Sentinel status for intervals preceding any known status.
pub const UNATTRIBUTED_LABEL: &str = "(none)";

/// What a log row's action label denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Status change ("Статус …" / "Status …")
    StatusChange,
    /// Operator opened an order
    OrderOpened,
    /// Operator closed an order
    OrderClosed,
    /// Anything else (logins, comments, unknown actions)
    Other,
}

/// Classify an action label.
///
/// Structural labels are exact matches; status labels are prefix-matched
/// case-insensitively on "Статус"/"Status".
pub fn classify_action(label: &str) -> ActionKind {
    let trimmed = label.trim();
    match trimmed {
        ORDER_OPENED_LABEL => ActionKind::OrderOpened,
        ORDER_CLOSED_LABEL => ActionKind::OrderClosed,
        _ => {
            let low = trimmed.to_lowercase();
            if low.starts_with("статус") || low.starts_with("status") {
                ActionKind::StatusChange
            } else {
                ActionKind::Other
            }
        }
    }
}

/// A single parsed log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Numeric record id from the source table, empty when missing
    pub record_id: String,
    /// Action label as pasted (trimmed)
    pub action: String,
    /// Kind of the action, classified at parse time
    pub kind: ActionKind,
    /// Operator label, possibly multi-word
    pub operator: String,
    /// Numeric order id, empty when the column was absent
    pub order_id: String,
    /// Local wall-clock instant of the row
    pub timestamp: NaiveDateTime,
}

/// Sorted, deduplicated operator labels present in a parse result.
///
/// Empty labels are omitted. The original UI fed its operator selector from
/// this list.
pub fn operators(events: &[Event]) -> Vec<String> {
    let mut ops: Vec<String> = events
        .iter()
        .map(|e| e.operator.clone())
        .filter(|o| !o.is_empty())
        .collect();
    ops.sort();
    ops.dedup();
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;

    fn make_event(operator: &str) -> Event {
        Event {
            record_id: String::new(),
            action: "Статус в работе".to_string(),
            kind: ActionKind::StatusChange,
            operator: operator.to_string(),
            order_id: String::new(),
            timestamp: parse_timestamp("2024-01-01 10:00:00").unwrap(),
        }
    }

    #[test]
    fn test_classify_structural_labels() {
        assert_eq!(classify_action("Открытие заказа"), ActionKind::OrderOpened);
        assert_eq!(classify_action("Закрытие заказа"), ActionKind::OrderClosed);
    }

    #[test]
    fn test_classify_status_prefix() {
        assert_eq!(classify_action("Статус в работе"), ActionKind::StatusChange);
        assert_eq!(
            classify_action("Статус пост-обработка"),
            ActionKind::StatusChange
        );
        assert_eq!(classify_action("статус перерыв"), ActionKind::StatusChange);
        assert_eq!(classify_action("Status break"), ActionKind::StatusChange);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_action("Вход в систему"), ActionKind::Other);
        assert_eq!(classify_action(""), ActionKind::Other);
        // Structural labels are exact: a prefix alone is not enough
        assert_eq!(classify_action("Открытие заказа 42"), ActionKind::Other);
    }

    #[test]
    fn test_classify_trims() {
        assert_eq!(classify_action("  Закрытие заказа  "), ActionKind::OrderClosed);
    }

    #[test]
    fn test_operators_sorted_dedup() {
        let events = vec![
            make_event("OpB"),
            make_event("OpA"),
            make_event("OpB"),
            make_event(""),
        ];
        assert_eq!(operators(&events), vec!["OpA".to_string(), "OpB".to_string()]);
    }

    #[test]
    fn test_operators_empty() {
        assert!(operators(&[]).is_empty());
    }
}
