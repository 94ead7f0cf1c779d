//! Column-layout recovery for rows with a variable field count.
//!
//! Depending on which optional cells were empty in the source table, a row
//! arrives with anywhere from zero to five-plus fields before the timestamp.
//! Each layout shape is a separate function tried in priority order (widest
//! first); the first one that applies wins. Keeping the shapes separate makes
//! each heuristic testable in isolation.

/// Fields recovered from the columns preceding the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// Numeric record id, empty when the first column is missing or non-numeric
    pub record_id: String,
    /// Action label
    pub action: String,
    /// Operator label, possibly re-joined from several fields
    pub operator: String,
    /// Numeric order id, empty when absent
    pub order_id: String,
}

/// True for `^\d+$` fields (record ids, order ids, page numbers).
pub(crate) fn is_all_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

fn record_id_of(field: &str) -> String {
    if is_all_digits(field) {
        field.to_string()
    } else {
        String::new()
    }
}

/// Four or more fields: id, action, operator spanning the middle, trailing
/// order id. A non-numeric trailer means the order cell was empty and the
/// operator name leaked across the extra columns.
fn full_table(fields: &[&str]) -> Option<RawRow> {
    if fields.len() < 4 {
        return None;
    }
    let last = fields[fields.len() - 1];
    let (operator, order_id) = if is_all_digits(last) {
        (fields[2..fields.len() - 1].join(" "), last.to_string())
    } else {
        (fields[2..].join(" "), String::new())
    };
    Some(RawRow {
        record_id: record_id_of(fields[0]),
        action: fields[1].to_string(),
        operator,
        order_id,
    })
}

/// Exactly three fields: id, action, operator (order cell empty).
fn id_action_operator(fields: &[&str]) -> Option<RawRow> {
    if fields.len() != 3 {
        return None;
    }
    Some(RawRow {
        record_id: record_id_of(fields[0]),
        action: fields[1].to_string(),
        operator: fields[2].to_string(),
        order_id: String::new(),
    })
}

/// Exactly two fields: id and action.
fn id_action(fields: &[&str]) -> Option<RawRow> {
    if fields.len() != 2 {
        return None;
    }
    Some(RawRow {
        record_id: record_id_of(fields[0]),
        action: fields[1].to_string(),
        operator: String::new(),
        order_id: String::new(),
    })
}

/// A single field: a bare id if numeric, otherwise a bare action.
fn single_field(fields: &[&str]) -> Option<RawRow> {
    if fields.len() != 1 {
        return None;
    }
    let mut row = RawRow::default();
    if is_all_digits(fields[0]) {
        row.record_id = fields[0].to_string();
    } else {
        row.action = fields[0].to_string();
    }
    Some(row)
}

const LAYOUTS: &[fn(&[&str]) -> Option<RawRow>] =
    &[full_table, id_action_operator, id_action, single_field];

/// Recover a row from the fields preceding the timestamp.
///
/// A timestamp-only line (no preceding fields) yields an empty row rather
/// than a rejection; the caller keeps it as a labelless event.
pub fn extract_row(fields: &[&str]) -> RawRow {
    LAYOUTS
        .iter()
        .find_map(|layout| layout(fields))
        .unwrap_or_default()
}
