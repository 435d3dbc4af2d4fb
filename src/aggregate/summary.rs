//! Yearly summaries and dataset comparison.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::report::MatchRecord;
use crate::scoring::{ScoringPolicy, round_cai};

/// Aggregate awareness statistics for one year of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: u16,
    /// Articles passing every aware gate.
    pub aware_count: usize,
    /// Sum of CAI over articles passing the inclusion gate.
    pub cumulative_cai: f64,
    /// Articles collected for the year (the crawl quota).
    pub total_processed: usize,
}

impl YearSummary {
    /// Folds a year's match records under `policy`.
    ///
    /// `quota` is the number of articles the crawler collected for the year;
    /// the records themselves only cover articles with at least one match.
    #[must_use]
    pub fn from_records(
        year: u16,
        records: &[MatchRecord],
        quota: usize,
        policy: &ScoringPolicy,
    ) -> Self {
        let mut aware_count = 0;
        let mut cumulative_cai = 0.0;
        for record in records {
            if policy.is_climate_aware(record.distinct, record.total, record.cai) {
                aware_count += 1;
            }
            if policy.counts_toward_cai(record.distinct) {
                cumulative_cai += record.cai;
            }
        }
        Self {
            year,
            aware_count,
            cumulative_cai: round_cai(cumulative_cai),
            total_processed: quota,
        }
    }

    /// Share of the year's articles classified aware.
    #[must_use]
    pub fn aware_rate(&self) -> f64 {
        if self.total_processed == 0 {
            return 0.0;
        }
        self.aware_count as f64 / self.total_processed as f64
    }
}

/// Ratios of dataset A to dataset B for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparison {
    pub year: u16,
    /// `aware_count(A) / aware_count(B)`; `None` when B has no aware articles.
    pub aware_ratio: Option<f64>,
    /// `cumulative_cai(A) / cumulative_cai(B)`; `None` when B's CAI is zero.
    pub cai_ratio: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// Compares two datasets over the years both cover, in year order.
#[must_use]
pub fn compare_summaries(a: &[YearSummary], b: &[YearSummary]) -> Vec<YearComparison> {
    let b_by_year: BTreeMap<u16, &YearSummary> =
        b.iter().map(|summary| (summary.year, summary)).collect();
    let a_by_year: BTreeMap<u16, &YearSummary> =
        a.iter().map(|summary| (summary.year, summary)).collect();

    a_by_year
        .into_iter()
        .filter_map(|(year, left)| {
            let right = b_by_year.get(&year)?;
            Some(YearComparison {
                year,
                aware_ratio: ratio(left.aware_count as f64, right.aware_count as f64),
                cai_ratio: ratio(left.cumulative_cai, right.cumulative_cai),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(distinct: usize, total: usize, cai: f64) -> MatchRecord {
        MatchRecord {
            index: 0,
            distinct,
            total,
            cai,
            matches: Vec::new(),
        }
    }

    fn summary(year: u16, aware_count: usize, cumulative_cai: f64) -> YearSummary {
        YearSummary {
            year,
            aware_count,
            cumulative_cai,
            total_processed: 1500,
        }
    }

    #[test]
    fn test_from_records_applies_both_gates() {
        let records = vec![
            record(9, 20, 0.1),  // aware, counted
            record(8, 15, 0.02), // aware at the boundary, counted
            record(6, 40, 0.3),  // not aware, counted
            record(4, 30, 0.9),  // neither
            record(20, 2, 5.0),  // total gate fails, counted
        ];
        let summary = YearSummary::from_records(1995, &records, 1500, &ScoringPolicy::default());
        assert_eq!(summary.aware_count, 2);
        assert!((summary.cumulative_cai - 5.42).abs() < 1e-9);
        assert_eq!(summary.total_processed, 1500);
    }

    #[test]
    fn test_from_records_empty_year() {
        let summary = YearSummary::from_records(1851, &[], 1500, &ScoringPolicy::default());
        assert_eq!(summary, YearSummary {
            year: 1851,
            aware_count: 0,
            cumulative_cai: 0.0,
            total_processed: 1500,
        });
        assert!(summary.aware_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_compare_joins_on_common_years() {
        let a = vec![summary(1990, 4, 2.0), summary(1991, 3, 1.0), summary(1992, 1, 0.5)];
        let b = vec![summary(1991, 0, 0.5), summary(1992, 2, 0.0), summary(1993, 1, 1.0)];
        let comparisons = compare_summaries(&a, &b);
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].year, 1991);
        assert_eq!(comparisons[0].aware_ratio, None);
        assert_eq!(comparisons[0].cai_ratio, Some(2.0));
        assert_eq!(comparisons[1].aware_ratio, Some(0.5));
        assert_eq!(comparisons[1].cai_ratio, None);
    }
}
