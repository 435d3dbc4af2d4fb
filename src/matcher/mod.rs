//! Exact phrase matching of keyword lists against normalized documents.
//!
//! Keywords are run through the same [`Normalizer`] as the documents they are
//! matched against, so `lower` and `lemma` runs each compare like with like.
//! A match is keyed by the keyword's normalized form (tokens joined by a
//! single space), which is also the form looked up in the IDF model.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::corpus::Document;
use crate::keywords::KeywordList;
use crate::normalize::Normalizer;

/// Matches of one keyword list in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Phrase occurrences, counting repeats.
    pub total: usize,
    /// Phrases matched at least once.
    pub distinct: usize,
    /// `(phrase, count)` pairs by descending count; ties keep first-occurrence order.
    pub counts: Vec<(String, usize)>,
}

impl MatchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[derive(Debug, Clone)]
struct Pattern {
    key: String,
    tokens: Vec<String>,
}

/// A keyword list compiled into token patterns.
///
/// Immutable once built; share it by reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    patterns: Vec<Pattern>,
    /// First token → pattern indices, longest pattern first.
    by_first_token: HashMap<String, Vec<usize>>,
}

impl PhraseMatcher {
    /// Compiles every keyword through `normalizer`.
    ///
    /// Keywords that normalize to nothing are dropped with a warning, and
    /// keywords that normalize to the same tokens share one pattern.
    #[must_use]
    #[instrument(skip_all, fields(keywords = keywords.len(), mode = %normalizer.mode()))]
    pub fn new(keywords: &KeywordList, normalizer: &Normalizer) -> Self {
        let mut patterns: Vec<Pattern> = Vec::with_capacity(keywords.len());
        for phrase in keywords.iter() {
            let tokens = normalizer.normalize(phrase);
            if tokens.is_empty() {
                warn!(phrase, "keyword normalizes to no terms and will never match");
                continue;
            }
            let key = tokens.join(" ");
            if patterns.iter().any(|pattern| pattern.key == key) {
                debug!(
                    phrase,
                    key = %key,
                    "keyword shares its normalized form with an earlier keyword"
                );
                continue;
            }
            patterns.push(Pattern { key, tokens });
        }

        let mut by_first_token: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            by_first_token
                .entry(pattern.tokens[0].clone())
                .or_default()
                .push(idx);
        }
        for indices in by_first_token.values_mut() {
            indices.sort_by(|a, b| patterns[*b].tokens.len().cmp(&patterns[*a].tokens.len()));
        }

        debug!(patterns = patterns.len(), "phrase matcher compiled");
        Self {
            patterns,
            by_first_token,
        }
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Normalized keys of the compiled patterns, in keyword rank order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.key.as_str())
    }

    /// Scans `document` left to right, taking the longest pattern that starts
    /// at each position. Matches never overlap.
    ///
    /// A keyword nested inside a longer match is not counted on its own: with
    /// both `climate` and `climate change` listed, the text "climate change"
    /// yields one `climate change` hit and no `climate` hit. Matchers that
    /// report every overlapping span would count two. Here `total` never
    /// exceeds the document's term count.
    #[must_use]
    pub fn find(&self, document: &Document) -> MatchResult {
        let terms = document.terms();
        // pattern index → (count, first match position)
        let mut hits: HashMap<usize, (usize, usize)> = HashMap::new();
        let mut total = 0;
        let mut pos = 0;

        while pos < terms.len() {
            let matched = self.by_first_token.get(&terms[pos]).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .find(|idx| terms[pos..].starts_with(&self.patterns[*idx].tokens))
            });
            match matched {
                Some(idx) => {
                    hits.entry(idx).or_insert((0, pos)).0 += 1;
                    total += 1;
                    pos += self.patterns[idx].tokens.len();
                }
                None => pos += 1,
            }
        }

        let mut ordered: Vec<(usize, (usize, usize))> = hits.into_iter().collect();
        ordered.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then_with(|| first_a.cmp(first_b))
        });
        let counts: Vec<(String, usize)> = ordered
            .into_iter()
            .map(|(idx, (count, _))| (self.patterns[idx].key.clone(), count))
            .collect();

        MatchResult {
            total,
            distinct: counts.len(),
            counts,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::normalize::{NormalizationMode, StopwordSet};

    fn normalizer(mode: NormalizationMode) -> Normalizer {
        Normalizer::with_stopwords(
            mode,
            StopwordSet::from_words(["the", "a", "of", "and", "is", "in"]),
        )
    }

    fn matcher(phrases: &[&str], normalizer: &Normalizer) -> PhraseMatcher {
        PhraseMatcher::new(&KeywordList::from_phrases(phrases).unwrap(), normalizer)
    }

    #[test]
    fn test_counts_sorted_by_frequency_then_first_occurrence() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["ozone", "emissions", "drought"], &n);
        let doc = n.document(
            "t",
            None,
            "Drought and emissions. Emissions, ozone, emissions, drought.",
        );
        let result = m.find(&doc);
        assert_eq!(result.total, 6);
        assert_eq!(result.distinct, 3);
        assert_eq!(
            result.counts,
            vec![
                ("emissions".to_string(), 3),
                ("drought".to_string(), 2),
                ("ozone".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_longest_phrase_wins_and_consumes_its_tokens() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["carbon", "carbon dioxide", "dioxide"], &n);
        let result = m.find(&n.document("t", None, "Carbon dioxide levels, not carbon alone."));
        assert_eq!(result.total, 2);
        assert_eq!(
            result.counts,
            vec![("carbon dioxide".to_string(), 1), ("carbon".to_string(), 1)]
        );
    }

    #[test]
    fn test_overlapping_phrases_do_not_double_count() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["sea level", "level rise"], &n);
        let result = m.find(&n.document("t", None, "Sea level rise"));
        assert_eq!(result.total, 1);
        assert_eq!(result.counts, vec![("sea level".to_string(), 1)]);
    }

    #[test]
    fn test_phrase_matches_across_removed_stopwords() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["rise of the seas"], &n);
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["rise seas"]);
        let result = m.find(&n.document("t", None, "The rise of seas is measured."));
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_keyword_of_only_stopwords_is_dropped() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["the", "glacier"], &n);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_lemma_mode_matches_inflections() {
        let n = normalizer(NormalizationMode::Lemma);
        let m = matcher(&["glaciers", "Glacier"], &n);
        assert_eq!(m.len(), 1);
        let result = m.find(&n.document("t", None, "The glacier retreats; glaciers shrink."));
        assert_eq!(result.total, 2);
        assert_eq!(result.distinct, 1);
    }

    #[test]
    fn test_no_match_and_empty_document() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["ozone"], &n);
        assert!(m.find(&n.document("t", None, "Budget talks stall.")).is_empty());
        assert_eq!(m.find(&n.document("t", None, "")), MatchResult::default());
    }

    #[test]
    fn test_distinct_le_total_le_length() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["ice", "ice sheet", "sheet", "melt"], &n);
        let doc = n.document("t", None, "ice sheet ice melt sheet ice ice sheet melt melt");
        let result = m.find(&doc);
        assert!(result.distinct <= result.total);
        assert!(result.total <= doc.len());
        assert_eq!(result.counts.iter().map(|(_, c)| c).sum::<usize>(), result.total);
    }

    #[test]
    fn test_shorter_keyword_inside_longer_match_not_counted() {
        let n = normalizer(NormalizationMode::Lower);
        let m = matcher(&["climate", "climate change"], &n);
        let result = m.find(&n.document("t", None, "Climate change is climate change."));
        assert_eq!(result.total, 2);
        assert_eq!(result.distinct, 1);
        assert_eq!(result.counts, vec![("climate change".to_string(), 2)]);
    }
}
