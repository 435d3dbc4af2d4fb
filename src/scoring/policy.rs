//! Classification thresholds and the CAI formula.

use crate::stats::IdfModel;

/// Weight per occurrence of a matched term absent from the IDF model.
pub const UNSEEN_TERM_WEIGHT: f64 = 10.0;

/// Articles the crawler collects per year; the denominator of yearly rates.
pub const DEFAULT_ARTICLES_PER_YEAR: usize = 1500;

const CAI_SCALE: f64 = 100_000.0;

/// Thresholds for classifying articles and weighting matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    /// Minimum distinct keywords for an aware article.
    pub aware_min_distinct: usize,
    /// Minimum total keyword occurrences for an aware article.
    pub aware_min_total: usize,
    /// Minimum CAI for an aware article.
    pub aware_min_cai: f64,
    /// Minimum distinct keywords for an article's CAI to count toward its year.
    pub cai_min_distinct: usize,
    /// Weight per occurrence of a term the IDF model has never seen.
    pub unseen_term_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            aware_min_distinct: 8,
            aware_min_total: 15,
            aware_min_cai: 0.02,
            cai_min_distinct: 5,
            unseen_term_weight: UNSEEN_TERM_WEIGHT,
        }
    }
}

impl ScoringPolicy {
    /// Computes the CAI of one article.
    ///
    /// Each `(phrase, count)` contributes `weight * count`, where the weight
    /// is the phrase's IDF, or for a phrase the model lacks, the sum over its
    /// space-separated tokens of their IDF or the unseen-term weight. The sum
    /// is divided by `max(doc_length, 1)` and rounded to 5 decimal places.
    #[must_use]
    pub fn article_cai(
        &self,
        matches: &[(String, usize)],
        idf: &IdfModel,
        doc_length: usize,
    ) -> f64 {
        let weighted: f64 = matches
            .iter()
            .map(|(phrase, count)| self.phrase_weight(phrase, idf) * *count as f64)
            .sum();
        let denominator = doc_length.max(1) as f64;
        round_cai(weighted / denominator)
    }

    fn phrase_weight(&self, phrase: &str, idf: &IdfModel) -> f64 {
        if let Some(weight) = idf.get(phrase) {
            return weight;
        }
        phrase
            .split_whitespace()
            .map(|token| idf.get(token).unwrap_or(self.unseen_term_weight))
            .sum()
    }

    /// All three gates must pass: distinct keywords, total occurrences and CAI.
    #[must_use]
    pub fn is_climate_aware(&self, distinct: usize, total: usize, cai: f64) -> bool {
        distinct >= self.aware_min_distinct
            && total >= self.aware_min_total
            && cai >= self.aware_min_cai
    }

    /// Whether an article's CAI is added to its year's cumulative CAI.
    #[must_use]
    pub fn counts_toward_cai(&self, distinct: usize) -> bool {
        distinct >= self.cai_min_distinct
    }
}

/// [`ScoringPolicy::article_cai`] under the default policy.
#[must_use]
pub fn article_cai(matches: &[(String, usize)], idf: &IdfModel, doc_length: usize) -> f64 {
    ScoringPolicy::default().article_cai(matches, idf, doc_length)
}

/// [`ScoringPolicy::is_climate_aware`] under the default policy.
#[must_use]
pub fn is_climate_aware(distinct: usize, total: usize, cai: f64) -> bool {
    ScoringPolicy::default().is_climate_aware(distinct, total, cai)
}

pub(crate) fn round_cai(value: f64) -> f64 {
    (value * CAI_SCALE).round() / CAI_SCALE
}
