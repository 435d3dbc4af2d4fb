//! Concurrent per-year job runner.
//!
//! Each year is an independent, idempotent, CPU-bound job. Jobs run on
//! blocking worker threads, bounded by a semaphore, and share only the
//! read-only state captured by the job closure.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::AggregateError;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Error type for yearly engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Completed and failed year counts for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl RunStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of years whose job succeeded.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Returns the number of years whose job failed or panicked.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the total number of years processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed() + self.failed()
    }

    fn increment_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Result of one year's job.
#[derive(Debug)]
pub struct YearOutcome<T> {
    pub year: u16,
    pub result: Result<T, AggregateError>,
}

/// Runs one job per year with bounded concurrency.
///
/// # Concurrency Model
///
/// - Each year runs on its own `spawn_blocking` worker
/// - A semaphore permit is acquired before spawning each worker
/// - Permits are released when the worker returns (RAII)
/// - A failing or panicking year is recorded and the rest carry on
#[derive(Debug)]
pub struct YearlyEngine {
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl YearlyEngine {
    /// Creates an engine running at most `concurrency` years at once.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }
        debug!(concurrency, "creating yearly engine");
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs `job` once per distinct year and returns the outcomes sorted by year.
    ///
    /// Individual year failures do NOT cause this method to error; they are
    /// returned in the outcomes and counted in the stats.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    #[instrument(skip(self, years, job))]
    pub async fn run<T, F, I>(
        &self,
        years: I,
        job: F,
    ) -> Result<(Vec<YearOutcome<T>>, RunStats), EngineError>
    where
        I: IntoIterator<Item = u16>,
        F: Fn(u16) -> Result<T, AggregateError> + Send + Sync + 'static,
        T: Send + 'static,
    {
        let years: BTreeSet<u16> = years.into_iter().collect();
        let job = Arc::new(job);
        let stats = Arc::new(RunStats::new());
        let mut handles = Vec::with_capacity(years.len());

        info!(years = years.len(), concurrency = self.concurrency, "starting yearly run");

        for year in years {
            // Acquire semaphore permit (blocks if at concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let job = Arc::clone(&job);
            let stats = Arc::clone(&stats);
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let result = job(year);
                match &result {
                    Ok(_) => {
                        debug!(year, "year completed");
                        stats.increment_completed();
                    }
                    Err(error) => {
                        warn!(year, error = %error, "year failed");
                        stats.increment_failed();
                    }
                }
                result
            });
            handles.push((year, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (year, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    warn!(year, error = %join_error, "year worker panicked");
                    stats.increment_failed();
                    Err(AggregateError::WorkerPanicked {
                        year,
                        reason: join_error.to_string(),
                    })
                }
            };
            outcomes.push(YearOutcome { year, result });
        }

        let completed = stats.completed();
        let failed = stats.failed();
        info!(completed, failed, total = completed + failed, "yearly run complete");

        let stats = Arc::try_unwrap(stats).unwrap_or_else(|shared| {
            let snapshot = RunStats::new();
            snapshot.completed.store(shared.completed(), Ordering::SeqCst);
            snapshot.failed.store(shared.failed(), Ordering::SeqCst);
            snapshot
        });
        Ok((outcomes, stats))
    }
}
