//! Error type for a single year's job.

use thiserror::Error;

use crate::corpus::CorpusError;
use crate::report::ReportError;

/// Failure of one year's scoring or summarizing job.
///
/// A failed year never aborts the other years of a run.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The year's corpus could not be read.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The year's report could not be read or written.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The worker running the year panicked.
    #[error("worker for year {year} panicked: {reason}")]
    WorkerPanicked { year: u16, reason: String },
}
