//! Candidate keyword ranking by mean TF-IDF over a domain corpus.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::corpus::{CorpusError, read_chunked};
use crate::normalize::Normalizer;
use crate::stats::{IdfModel, term_frequency, tf_idf_map};

/// Terms found in this many documents or fewer are treated as noise.
pub const DEFAULT_MIN_DOCUMENTS: usize = 50;

/// Substrings that mark e-mail addresses and URLs.
const DEFAULT_EXCLUDED_SUBSTRINGS: &[&str] = &["@", "http"];

/// Filters applied when ranking candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// A term must appear in strictly more documents than this.
    pub min_documents: usize,
    /// Terms containing any of these are dropped.
    pub excluded_substrings: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            min_documents: DEFAULT_MIN_DOCUMENTS,
            excluded_substrings: DEFAULT_EXCLUDED_SUBSTRINGS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl DiscoveryOptions {
    fn admits(&self, term: &str, document_count: usize) -> bool {
        document_count > self.min_documents
            && !self
                .excluded_substrings
                .iter()
                .any(|excluded| term.contains(excluded.as_str()))
    }
}

/// A ranked keyword candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateKeyword {
    pub term: String,
    /// Mean TF-IDF over the documents containing the term.
    pub mean_tf_idf: f64,
    /// Number of documents containing the term.
    pub document_count: usize,
}

/// Running per-term (TF-IDF sum, document count) totals.
///
/// Lets a domain corpus be folded in chunk by chunk instead of holding every
/// TF-IDF map at once.
#[derive(Debug, Clone, Default)]
pub struct CandidateAccumulator {
    totals: HashMap<String, (f64, usize)>,
    documents: usize,
}

impl CandidateAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in one document's TF-IDF map.
    pub fn add(&mut self, tf_idf: &HashMap<String, f64>) {
        self.documents += 1;
        for (term, value) in tf_idf {
            let entry = self.totals.entry(term.clone()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    /// Number of documents folded in so far.
    #[must_use]
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Filters and ranks the accumulated terms.
    ///
    /// Order: mean TF-IDF descending, then document count descending, then
    /// term ascending.
    #[must_use]
    pub fn finish(self, options: &DiscoveryOptions) -> Vec<CandidateKeyword> {
        let vocabulary = self.totals.len();
        let mut candidates: Vec<CandidateKeyword> = self
            .totals
            .into_iter()
            .filter(|(term, (_, count))| options.admits(term, *count))
            .map(|(term, (sum, count))| CandidateKeyword {
                term,
                mean_tf_idf: sum / count as f64,
                document_count: count,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.mean_tf_idf
                .total_cmp(&a.mean_tf_idf)
                .then_with(|| b.document_count.cmp(&a.document_count))
                .then_with(|| a.term.cmp(&b.term))
        });
        debug!(vocabulary, candidates = candidates.len(), "candidates ranked");
        candidates
    }
}

/// Ranks candidate keywords from per-document TF-IDF maps.
#[must_use]
pub fn discover_candidates<'a, I>(
    tf_idf_maps: I,
    options: &DiscoveryOptions,
) -> Vec<CandidateKeyword>
where
    I: IntoIterator<Item = &'a HashMap<String, f64>>,
{
    let mut accumulator = CandidateAccumulator::new();
    for tf_idf in tf_idf_maps {
        accumulator.add(tf_idf);
    }
    accumulator.finish(options)
}

/// Streams every domain corpus file and ranks candidates against `idf`.
///
/// # Errors
/// Returns [`CorpusError`] if any corpus file cannot be read.
#[instrument(skip(normalizer, idf, options), fields(corpora = paths.len()))]
pub fn discover_from_corpora(
    paths: &[&Path],
    normalizer: &Normalizer,
    idf: &IdfModel,
    options: &DiscoveryOptions,
    chunk_size: usize,
) -> Result<Vec<CandidateKeyword>, CorpusError> {
    let mut accumulator = CandidateAccumulator::new();
    for path in paths {
        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        read_chunked(path, chunk_size, |chunk| {
            for article in chunk {
                let document = normalizer.document(&source, None, &article.text());
                accumulator.add(&tf_idf_map(&term_frequency(&document), idf));
            }
        })?;
    }
    info!(documents = accumulator.documents(), "domain corpora scanned");
    Ok(accumulator.finish(options))
}
