//! TF, IDF and TF-IDF computations.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{info, instrument};

use super::IdfModel;
use crate::corpus::{CorpusError, Document, read_chunked};
use crate::normalize::Normalizer;

/// TF-IDF returned for a term absent from the IDF model.
///
/// A term never seen in the reference corpus is treated as highly
/// distinctive instead of scoring zero.
pub const UNSEEN_TERM_TF_IDF: f64 = 1000.0;

/// Relative frequency of each normalized term within one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequencyMap {
    frequencies: HashMap<String, f64>,
}

impl TermFrequencyMap {
    #[must_use]
    pub fn get(&self, term: &str) -> Option<f64> {
        self.frequencies.get(term).copied()
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.frequencies.contains_key(term)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frequencies
            .iter()
            .map(|(term, frequency)| (term.as_str(), *frequency))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    /// Sum of all frequencies: 1.0 for a non-empty document, 0.0 otherwise.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.frequencies.values().sum()
    }
}

/// Computes term frequencies for `document`.
///
/// A document with no normalized terms yields an empty map.
#[must_use]
pub fn term_frequency(document: &Document) -> TermFrequencyMap {
    let length = document.len();
    if length == 0 {
        return TermFrequencyMap::default();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for term in document.terms() {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }

    let length = length as f64;
    let frequencies = counts
        .into_iter()
        .map(|(term, count)| (term.to_string(), count as f64 / length))
        .collect();
    TermFrequencyMap { frequencies }
}

/// Computes `ln(N / df(t))` for every term present in at least one map.
#[must_use]
#[instrument(skip(tf_maps), fields(documents = tf_maps.len()))]
pub fn inverse_document_frequency(tf_maps: &[TermFrequencyMap]) -> IdfModel {
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for tf_map in tf_maps {
        for term in tf_map.terms() {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }
    let document_frequency = document_frequency
        .into_iter()
        .map(|(term, df)| (term.to_string(), df))
        .collect();
    IdfModel::from_document_frequencies(document_frequency, tf_maps.len())
}

/// TF-IDF of `term`, or [`UNSEEN_TERM_TF_IDF`] if the IDF model lacks it.
#[must_use]
pub fn tf_idf(term: &str, tf_map: &TermFrequencyMap, idf_model: &IdfModel) -> f64 {
    let Some(idf) = idf_model.get(term) else {
        return UNSEEN_TERM_TF_IDF;
    };
    tf_map.get(term).unwrap_or(0.0) * idf
}

/// TF-IDF of every term of `tf_map`.
#[must_use]
pub fn tf_idf_map(tf_map: &TermFrequencyMap, idf_model: &IdfModel) -> HashMap<String, f64> {
    tf_map
        .terms()
        .map(|term| (term.to_string(), tf_idf(term, tf_map, idf_model)))
        .collect()
}

/// Builds the IDF model from a reference corpus file, streaming it in chunks.
///
/// Only per-term document counts are kept between chunks, so memory is
/// bounded by vocabulary size plus one chunk of documents.
///
/// # Errors
/// Returns [`CorpusError`] if the corpus cannot be read or the chunk size is invalid.
#[instrument(skip(normalizer), fields(path = %path.display(), mode = %normalizer.mode()))]
pub fn build_idf_model(
    path: &Path,
    normalizer: &Normalizer,
    chunk_size: usize,
) -> Result<IdfModel, CorpusError> {
    let source = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut document_frequency: HashMap<String, usize> = HashMap::new();

    let documents = read_chunked(path, chunk_size, |chunk| {
        for article in chunk {
            let document = normalizer.document(&source, None, &article.text());
            let distinct: HashSet<&String> = document.terms().iter().collect();
            for term in distinct {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }
    })?;

    info!(
        documents,
        terms = document_frequency.len(),
        "reference IDF model built"
    );
    Ok(
        IdfModel::from_document_frequencies(document_frequency, documents)
            .with_mode(normalizer.mode()),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn doc(terms: &[&str]) -> Document {
        let terms: Vec<String> = terms.iter().map(|t| (*t).to_string()).collect();
        Document::new("test", None, terms.clone(), terms)
    }

    #[test]
    fn test_term_frequency_divides_by_length() {
        let tf = term_frequency(&doc(&["ice", "melt", "ice", "sea"]));
        assert_eq!(tf.get("ice"), Some(0.5));
        assert_eq!(tf.get("melt"), Some(0.25));
        assert_eq!(tf.len(), 3);
    }

    #[test]
    fn test_term_frequency_sums_to_one() {
        let tf = term_frequency(&doc(&["a1", "b2", "c3", "a1", "a1", "d4", "e5"]));
        assert!((tf.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_term_frequency_empty_document_is_empty_map() {
        let tf = term_frequency(&doc(&[]));
        assert!(tf.is_empty());
        assert!(tf.total().abs() < f64::EPSILON);
    }

    #[test]
    fn test_idf_matches_log_ratio() {
        let maps = vec![
            term_frequency(&doc(&["carbon", "tax"])),
            term_frequency(&doc(&["carbon"])),
            term_frequency(&doc(&["budget"])),
            term_frequency(&doc(&["budget", "tax"])),
        ];
        let idf = inverse_document_frequency(&maps);
        assert_eq!(idf.documents(), 4);
        assert!((idf.get("carbon").unwrap() - (4.0_f64 / 2.0).ln()).abs() < 1e-12);
        assert!((idf.get("budget").unwrap() - (2.0_f64).ln()).abs() < 1e-12);
        assert!(idf.get("ocean").is_none());
    }

    #[test]
    fn test_idf_non_increasing_in_document_frequency() {
        // term_k appears in the first k documents.
        let maps: Vec<_> = (1..=6)
            .map(|i| {
                let terms: Vec<String> = (i..=6).map(|k| format!("term{k}")).collect();
                let refs: Vec<&str> = terms.iter().map(String::as_str).collect();
                term_frequency(&doc(&refs))
            })
            .collect();
        let idf = inverse_document_frequency(&maps);
        let values: Vec<f64> = (1..=6).map(|k| idf.get(&format!("term{k}")).unwrap()).collect();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "idf must not increase with df: {values:?}");
        }
        assert!(values[5].abs() < 1e-12, "term in every document has idf 0");
    }

    #[test]
    fn test_idf_of_empty_corpus_is_empty() {
        let idf = inverse_document_frequency(&[]);
        assert!(idf.is_empty());
        assert_eq!(idf.documents(), 0);
    }

    #[test]
    fn test_tf_idf_known_term() {
        let tf = term_frequency(&doc(&["carbon", "tax"]));
        let idf = IdfModel::from_weights([("carbon".to_string(), 2.0)], 10);
        assert!((tf_idf("carbon", &tf, &idf) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tf_idf_unseen_term_is_sentinel_regardless_of_tf() {
        let idf = IdfModel::from_weights([("carbon".to_string(), 2.0)], 10);
        let heavy = term_frequency(&doc(&["glacier", "glacier", "glacier"]));
        let light = term_frequency(&doc(&["glacier", "a", "b", "c", "d"]));
        assert_eq!(tf_idf("glacier", &heavy, &idf), UNSEEN_TERM_TF_IDF);
        assert_eq!(tf_idf("glacier", &light, &idf), UNSEEN_TERM_TF_IDF);
        assert_eq!(tf_idf("glacier", &TermFrequencyMap::default(), &idf), 1000.0);
    }

    #[test]
    fn test_tf_idf_map_covers_every_term() {
        let tf = term_frequency(&doc(&["carbon", "tax"]));
        let idf = IdfModel::from_weights([("carbon".to_string(), 2.0)], 10);
        let map = tf_idf_map(&tf, &idf);
        assert_eq!(map.len(), 2);
        assert_eq!(map["tax"], UNSEEN_TERM_TF_IDF);
    }
}
