//! CSV output format for interval listings
//!
//! One row per emitted interval, for spreadsheet analysis of a shift.
//! Totals are omitted: a spreadsheet pivots them out of the rows.

use crate::attribution::AttributionResult;
use crate::timestamp::format_timestamp;

/// CSV record for a single interval
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub from: String,
    pub to: String,
    pub status: String,
    pub action: String,
    pub duration_ms: i64,
    pub credited: bool,
    pub large_gap_warning: bool,
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<CsvRow>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect all intervals of a result.
    pub fn from_result(result: &AttributionResult) -> Self {
        let mut output = Self::new();
        for interval in &result.intervals {
            output.add_row(CsvRow {
                from: format_timestamp(interval.from),
                to: format_timestamp(interval.to),
                status: interval.attributed_status.clone(),
                action: interval.triggering_action.clone(),
                duration_ms: interval.duration_ms,
                credited: interval.credited,
                large_gap_warning: interval.large_gap_warning,
            });
        }
        output
    }

    /// Add a row to the output
    pub fn add_row(&mut self, row: CsvRow) {
        self.rows.push(row);
    }

    fn header() -> &'static str {
        "from,to,status,action,duration_ms,credited,large_gap_warning"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(row: &CsvRow) -> String {
        [
            Self::escape_field(&row.from),
            Self::escape_field(&row.to),
            Self::escape_field(&row.status),
            Self::escape_field(&row.action),
            row.duration_ms.to_string(),
            row.credited.to_string(),
            row.large_gap_warning.to_string(),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');
        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }
        output
    }
}
