//! CLI argument parsing for Optally

use crate::attribution::RawConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for attribution reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "optally")]
#[command(version)]
#[command(about = "Status-time attribution for pasted order-event logs", long_about = None)]
pub struct Cli {
    /// Input file with the pasted table (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Only count events of this operator (exact label; default: all)
    #[arg(short, long, value_name = "LABEL")]
    pub operator: Option<String>,

    /// Window start, YYYY-MM-DD HH:MM:SS (defaults to the first event)
    #[arg(long = "from", value_name = "TIMESTAMP")]
    pub window_start: Option<String>,

    /// Window end, YYYY-MM-DD HH:MM:SS (defaults to the last event)
    #[arg(long = "to", value_name = "TIMESTAMP")]
    pub window_end: Option<String>,

    /// Drop intervals shorter than this many seconds
    #[arg(long = "min-gap", value_name = "SECONDS", default_value = "0")]
    pub min_gap_seconds: String,

    /// Flag in-progress gaps before an order at least this long (minutes, 0 disables)
    #[arg(long = "gap-warn", value_name = "MINUTES", default_value = "30")]
    pub gap_warn_minutes: String,

    /// Count time after order close as in-progress until the next order
    #[arg(
        long = "mode-b",
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub mode_b: bool,

    /// Keep only the last event when several share a timestamp
    #[arg(long = "dedupe")]
    pub dedupe_same_time: bool,

    /// Deprecated: drop everything except status-change events
    #[arg(long = "status-lines-only")]
    pub status_lines_only: bool,

    /// TOML file with noise rules replacing the built-in set
    #[arg(long = "noise-rules", value_name = "PATH")]
    pub noise_rules: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing to stderr
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Flags as the raw configuration the library resolves with coercion.
    pub fn raw_config(&self) -> RawConfig {
        RawConfig {
            operator: self.operator.clone().unwrap_or_default(),
            status_lines_only: self.status_lines_only,
            window_start: self.window_start.clone().unwrap_or_default(),
            window_end: self.window_end.clone().unwrap_or_default(),
            min_gap_seconds: self.min_gap_seconds.clone(),
            gap_warn_minutes: self.gap_warn_minutes.clone(),
            mode_b_enabled: self.mode_b,
            dedupe_same_time: self.dedupe_same_time,
        }
    }
}
