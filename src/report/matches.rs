//! Per-year match reports.

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, instrument, warn};

use super::{ReportError, for_each_row, write_atomically};
use crate::scoring::ArticleScore;

/// One scored article as read back from a match report.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub index: usize,
    pub distinct: usize,
    pub total: usize,
    pub cai: f64,
    /// `(phrase, count)` pairs, most frequent first.
    pub matches: Vec<(String, usize)>,
}

impl From<&ArticleScore> for MatchRecord {
    fn from(score: &ArticleScore) -> Self {
        Self {
            index: score.index,
            distinct: score.distinct,
            total: score.total,
            cai: score.cai,
            matches: score.matches.clone(),
        }
    }
}

impl MatchRecord {
    /// Parses one `index,distinct,total,cai[,detail]` row.
    fn parse_row(row: &str) -> Result<Self, String> {
        let mut fields = row.splitn(5, ',');
        let mut next = |name: &str| {
            fields
                .next()
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .ok_or_else(|| format!("missing {name} field"))
        };

        let index = next("index")?;
        let distinct = next("distinct")?;
        let total = next("total")?;
        let cai = next("cai")?;
        let detail = next("detail").ok();

        let index = index.parse().map_err(|_| format!("invalid index '{index}'"))?;
        let distinct: usize = distinct
            .parse()
            .map_err(|_| format!("invalid distinct count '{distinct}'"))?;
        let total: usize = total
            .parse()
            .map_err(|_| format!("invalid total count '{total}'"))?;
        let cai: f64 = cai.parse().map_err(|_| format!("invalid CAI '{cai}'"))?;
        if !cai.is_finite() || cai < 0.0 {
            return Err(format!("CAI must be finite and non-negative, got {cai}"));
        }
        if distinct > total {
            return Err(format!("distinct count {distinct} exceeds total {total}"));
        }
        let matches = match detail {
            Some(detail) => serde_json::from_str(detail)
                .map_err(|err| format!("invalid match detail: {err}"))?,
            None => Vec::new(),
        };

        Ok(Self {
            index,
            distinct,
            total,
            cai,
            matches,
        })
    }
}

/// Writes a match report in the order given.
///
/// # Errors
/// Returns [`ReportError::Write`] if the report cannot be written.
#[instrument(skip(scores), fields(path = %path.display(), rows = scores.len()))]
pub fn write_match_report(path: &Path, scores: &[ArticleScore]) -> Result<(), ReportError> {
    write_atomically(path, |writer| {
        for score in scores {
            let detail = serde_json::to_string(&score.matches).map_err(io::Error::from)?;
            writeln!(
                writer,
                "{},{},{},{},{detail}",
                score.index, score.distinct, score.total, score.cai
            )?;
        }
        Ok(())
    })
    .map_err(|source| ReportError::write(path, source))
}

/// Reads a match report, skipping malformed rows with a warning.
///
/// Rows that fail to parse, including rows that are not valid UTF-8, are
/// counted and logged; the rest of the report is still returned.
///
/// # Errors
/// Returns [`ReportError::Read`] if the report is missing or unreadable.
#[instrument(fields(path = %path.display()))]
pub fn read_match_report(path: &Path) -> Result<Vec<MatchRecord>, ReportError> {
    let mut records = Vec::new();
    let mut skipped = 0_usize;

    for_each_row(path, |line, row| {
        let parsed = row
            .map_err(|err| format!("row is not valid UTF-8: {err}"))
            .and_then(MatchRecord::parse_row);
        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                warn!(line, reason = %reason, "skipping malformed match report row");
            }
        }
        Ok(())
    })?;

    debug!(records = records.len(), skipped, "match report read");
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn score(index: usize, distinct: usize, total: usize, cai: f64) -> ArticleScore {
        ArticleScore {
            index,
            distinct,
            total,
            cai,
            matches: vec![("el niño".to_string(), total - distinct + 1)],
        }
    }

    #[test]
    fn test_written_rows_keep_order_and_detail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1997.txt");
        let scores = vec![score(4, 9, 20, 0.12345), score(1, 2, 3, 0.5)];

        write_match_report(&path, &scores).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().next().unwrap(), r#"4,9,20,0.12345,[["el niño",12]]"#);

        let records = read_match_report(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], MatchRecord::from(&scores[0]));
        assert_eq!(records[1].index, 1);
    }

    #[test]
    fn test_parse_row_without_detail() {
        let record = MatchRecord::parse_row("7,8,15,0.02").unwrap();
        assert_eq!(record.distinct, 8);
        assert!(record.matches.is_empty());
    }

    #[test]
    fn test_parse_row_rejects_bad_fields() {
        assert!(MatchRecord::parse_row("x,1,1,0.1").is_err());
        assert!(MatchRecord::parse_row("1,1,1").is_err());
        assert!(MatchRecord::parse_row("1,5,2,0.1").is_err());
        assert!(MatchRecord::parse_row("1,1,1,-0.1").is_err());
        assert!(MatchRecord::parse_row("1,1,1,0.1,{not json").is_err());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2001.txt");
        std::fs::write(&path, "1,9,16,0.3,[]\ngarbage\n\n2,5,6,0.1,[]\n").unwrap();
        let records = read_match_report(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].index, 2);
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2002.txt");
        std::fs::write(&path, b"1,9,16,0.3,[]\n\xff\xfe,8,15\n2,5,6,0.1,[]\n").unwrap();
        let records = read_match_report(&path).unwrap();
        let indices: Vec<usize> = records.iter().map(|record| record.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_missing_report_is_read_error() {
        let err = read_match_report(Path::new("/nonexistent/1990.txt")).unwrap_err();
        assert!(matches!(err, ReportError::Read { .. }));
    }
}
