//! Yearly summary reports.

use std::io::Write;
use std::path::Path;

use tracing::{debug, instrument, warn};

use super::{ReportError, for_each_row, write_atomically};
use crate::aggregate::YearSummary;

fn parse_row(row: &str) -> Result<YearSummary, String> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    let [year, aware, cai, total] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };
    let cumulative_cai: f64 = cai.parse().map_err(|_| format!("invalid CAI '{cai}'"))?;
    if !cumulative_cai.is_finite() || cumulative_cai < 0.0 {
        return Err(format!("CAI must be finite and non-negative, got {cumulative_cai}"));
    }
    Ok(YearSummary {
        year: year.parse().map_err(|_| format!("invalid year '{year}'"))?,
        aware_count: aware.parse().map_err(|_| format!("invalid aware count '{aware}'"))?,
        cumulative_cai,
        total_processed: total.parse().map_err(|_| format!("invalid total '{total}'"))?,
    })
}

/// Writes one `year,aware_count,cumulative_cai,total_processed` row per summary.
///
/// # Errors
/// Returns [`ReportError::Write`] if the report cannot be written.
#[instrument(skip(summaries), fields(path = %path.display(), years = summaries.len()))]
pub fn write_summary_report(path: &Path, summaries: &[YearSummary]) -> Result<(), ReportError> {
    write_atomically(path, |writer| {
        for summary in summaries {
            writeln!(
                writer,
                "{},{},{},{}",
                summary.year, summary.aware_count, summary.cumulative_cai, summary.total_processed
            )?;
        }
        Ok(())
    })
    .map_err(|source| ReportError::write(path, source))
}

/// Reads a summary report, skipping malformed rows with a warning.
///
/// # Errors
/// Returns [`ReportError::Read`] if the report is missing or unreadable.
#[instrument(fields(path = %path.display()))]
pub fn read_summary_report(path: &Path) -> Result<Vec<YearSummary>, ReportError> {
    let mut summaries = Vec::new();
    let mut skipped = 0_usize;

    for_each_row(path, |line, row| {
        let parsed = row
            .map_err(|err| format!("row is not valid UTF-8: {err}"))
            .and_then(parse_row);
        match parsed {
            Ok(summary) => summaries.push(summary),
            Err(reason) => {
                skipped += 1;
                warn!(line, reason = %reason, "skipping malformed summary row");
            }
        }
        Ok(())
    })?;

    debug!(years = summaries.len(), skipped, "summary report read");
    Ok(summaries)
}
