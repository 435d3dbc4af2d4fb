//! Per-article scoring over whole corpus files.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::ScoringPolicy;
use crate::corpus::{CorpusError, Document, read_chunked};
use crate::keywords::KeywordList;
use crate::matcher::PhraseMatcher;
use crate::normalize::Normalizer;
use crate::stats::IdfModel;

/// Score of one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleScore {
    /// Position of the article within its corpus file.
    pub index: usize,
    pub distinct: usize,
    pub total: usize,
    pub cai: f64,
    /// `(phrase, count)` pairs, most frequent first.
    pub matches: Vec<(String, usize)>,
}

/// Everything a scoring run shares read-only: built once, then wrapped in an
/// `Arc` and handed to every worker.
#[derive(Debug)]
pub struct ScoringContext {
    normalizer: Normalizer,
    matcher: PhraseMatcher,
    idf: IdfModel,
    policy: ScoringPolicy,
}

impl ScoringContext {
    /// Compiles `keywords` through `normalizer` and bundles the result with
    /// the IDF model and policy.
    #[must_use]
    #[instrument(
        skip_all,
        fields(mode = %normalizer.mode(), keywords = keywords.len(), idf_terms = idf.len())
    )]
    pub fn new(
        normalizer: Normalizer,
        keywords: &KeywordList,
        idf: IdfModel,
        policy: ScoringPolicy,
    ) -> Self {
        idf.check_mode(normalizer.mode());
        let matcher = PhraseMatcher::new(keywords, &normalizer);
        Self {
            normalizer,
            matcher,
            idf,
            policy,
        }
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn matcher(&self) -> &PhraseMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn idf(&self) -> &IdfModel {
        &self.idf
    }

    #[must_use]
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Normalizes and scores a standalone text.
    #[must_use]
    pub fn score_text(&self, index: usize, text: &str) -> ArticleScore {
        let document = self.normalizer.document("text", None, text);
        score_document(self, index, &document)
    }
}

/// Matches `document` and computes its CAI.
///
/// The CAI denominator is the raw token count of the document.
#[must_use]
pub fn score_document(context: &ScoringContext, index: usize, document: &Document) -> ArticleScore {
    let result = context.matcher.find(document);
    let cai = context
        .policy
        .article_cai(&result.counts, &context.idf, document.raw_len());
    ArticleScore {
        index,
        distinct: result.distinct,
        total: result.total,
        cai,
        matches: result.counts,
    }
}

/// Scores every article of a corpus file, streaming it in chunks.
///
/// Only articles with at least one match are returned, sorted by distinct
/// count descending; equal counts keep corpus order.
///
/// # Errors
/// Returns [`CorpusError`] if the corpus cannot be read or the chunk size is invalid.
#[instrument(skip(context), fields(path = %path.display()))]
pub fn score_corpus(
    context: &ScoringContext,
    path: &Path,
    year: Option<u16>,
    chunk_size: usize,
) -> Result<Vec<ArticleScore>, CorpusError> {
    let source = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut scores = Vec::new();

    let articles = read_chunked(path, chunk_size, |chunk| {
        for article in chunk {
            let document = context.normalizer.document(&source, year, &article.text());
            let score = score_document(context, article.index, &document);
            if score.distinct > 0 {
                scores.push(score);
            }
        }
        debug!(matched = scores.len(), "chunk scored");
    })?;

    scores.sort_by(|a, b| b.distinct.cmp(&a.distinct));
    info!(articles, matched = scores.len(), "corpus scored");
    Ok(scores)
}
