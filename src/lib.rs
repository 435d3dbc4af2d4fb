//! CliChA Core Library
//!
//! This library provides the keyword-discovery and scoring pipeline for the
//! climate-change awareness tool, which turns crawled article corpora into
//! per-article and per-year awareness statistics.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`corpus`] - Corpus file reading/writing, document delimiting and chunking
//! - [`normalize`] - Tokenization, stopword filtering and lower/lemma normalization
//! - [`stats`] - Term frequency, inverse document frequency and the persisted IDF model
//! - [`keywords`] - Keyword candidate discovery, curation and the keyword list asset
//! - [`matcher`] - Precompiled phrase matcher over normalized documents
//! - [`scoring`] - Climate Awareness Index (CAI) and classification policy
//! - [`aggregate`] - Per-year summaries, the concurrent yearly engine and dataset comparison
//! - [`report`] - Delimited report files exchanged with rendering/storage collaborators

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregate;
pub mod corpus;
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod scoring;
pub mod stats;

// Re-export commonly used types
pub use aggregate::{
    AggregateError, DEFAULT_CONCURRENCY, EngineError, RunStats, YearComparison, YearOutcome,
    YearSummary, YearlyEngine, compare_summaries,
};
pub use corpus::{
    CorpusError, CorpusWriter, DEFAULT_CHUNK_SIZE, DOCUMENT_DELIMITER, Document, RawArticle,
    RawDocuments, read_chunked,
};
pub use keywords::{
    CandidateAccumulator, CandidateKeyword, CurationRules, DEFAULT_MIN_DOCUMENTS,
    DiscoveryOptions, KeywordError, KeywordList, MAX_KEYWORDS, curate, discover_candidates,
    discover_from_corpora,
};
pub use matcher::{MatchResult, PhraseMatcher};
pub use normalize::{NormalizationMode, Normalizer, StopwordSet};
pub use report::{
    MatchRecord, ReportError, read_candidate_report, read_match_report, read_summary_report,
    write_candidate_report, write_match_report, write_summary_report,
};
pub use scoring::{
    ArticleScore, DEFAULT_ARTICLES_PER_YEAR, ScoringContext, ScoringPolicy, UNSEEN_TERM_WEIGHT,
    article_cai, is_climate_aware, score_corpus, score_document,
};
pub use stats::{
    IdfModel, IdfModelError, TermFrequencyMap, UNSEEN_TERM_TF_IDF, build_idf_model,
    inverse_document_frequency, term_frequency, tf_idf, tf_idf_map,
};
