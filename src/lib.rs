//! Optally - status-time attribution for pasted order-event logs
//!
//! This library reconstructs a per-operator timeline from a pasted,
//! tab/space-delimited status-change history and attributes elapsed time to
//! status labels within a configurable window. The parser is tolerant of
//! copy-paste damage (lost tabs, pagination chrome, stray headers); the
//! attribution engine is a total function that degrades to empty results on
//! malformed input instead of failing.

pub mod attribution;
pub mod cli;
pub mod csv_output;
pub mod event;
pub mod json_output;
pub mod layout;
pub mod noise;
pub mod parser;
pub mod report;
pub mod timestamp;
