//! Per-year aggregation of article scores.
//!
//! [`YearSummary`] folds one year's match records into an aware-article count
//! and a cumulative CAI; [`YearlyEngine`] runs per-year jobs concurrently;
//! [`compare_summaries`] lines two datasets up year by year.

mod engine;
mod error;
mod summary;

pub use engine::{DEFAULT_CONCURRENCY, EngineError, RunStats, YearOutcome, YearlyEngine};
pub use error::AggregateError;
pub use summary::{YearComparison, YearSummary, compare_summaries};
