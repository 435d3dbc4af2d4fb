//! Candidate keyword reports for human review.

use std::io::Write;
use std::path::Path;

use tracing::instrument;

use super::{ReportError, for_each_row, write_atomically};
use crate::keywords::CandidateKeyword;

/// Writes one `term,mean_tf_idf,document_count` row per candidate, in rank order.
///
/// # Errors
/// Returns [`ReportError::Write`] if the report cannot be written.
#[instrument(skip(candidates), fields(path = %path.display(), candidates = candidates.len()))]
pub fn write_candidate_report(
    path: &Path,
    candidates: &[CandidateKeyword],
) -> Result<(), ReportError> {
    write_atomically(path, |writer| {
        for candidate in candidates {
            writeln!(
                writer,
                "{},{},{}",
                candidate.term, candidate.mean_tf_idf, candidate.document_count
            )?;
        }
        Ok(())
    })
    .map_err(|source| ReportError::write(path, source))
}

/// Reads a candidate report, preserving its row order as rank.
///
/// The report is meant to be edited by hand, so any malformed row is an error.
///
/// # Errors
/// Returns [`ReportError::Read`] if the report cannot be read and
/// [`ReportError::Malformed`] for a row that does not parse.
#[instrument(fields(path = %path.display()))]
pub fn read_candidate_report(path: &Path) -> Result<Vec<CandidateKeyword>, ReportError> {
    let mut candidates = Vec::new();
    for_each_row(path, |line, row| {
        let malformed = |reason: String| ReportError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let row = row.map_err(|err| malformed(format!("row is not valid UTF-8: {err}")))?;
        let trimmed = row.trim();
        if trimmed.starts_with('#') {
            return Ok(());
        }
        candidates.push(parse_row(trimmed).map_err(malformed)?);
        Ok(())
    })?;
    Ok(candidates)
}

fn parse_row(row: &str) -> Result<CandidateKeyword, String> {
    // Terms may contain commas ("1,000"), so split from the right.
    let mut fields = row.rsplitn(3, ',');
    let (Some(count), Some(mean), Some(term)) = (fields.next(), fields.next(), fields.next()) else {
        return Err("expected 'term,mean_tf_idf,document_count'".to_string());
    };
    let term = term.trim();
    if term.is_empty() {
        return Err("empty term".to_string());
    }
    Ok(CandidateKeyword {
        term: term.to_string(),
        mean_tf_idf: mean
            .trim()
            .parse()
            .map_err(|_| format!("invalid mean tf-idf '{}'", mean.trim()))?,
        document_count: count
            .trim()
            .parse()
            .map_err(|_| format!("invalid document count '{}'", count.trim()))?,
    })
}
