// Interval attribution for operator status timelines.
//
// Walks chronologically ordered events and assigns elapsed time to the
// operator's current status. Special rules: post-processing time is credited
// only inside an order's open/close bracket, and mode B reassigns the status
// after order closure to in-progress until the next order opens.

mod config;
mod engine;

pub use config::{AttributionConfig, RawConfig, StatusFilter, ALL_OPERATORS};
pub use engine::{attribute, AttributionResult, Interval, Totals};
