//! Climate Awareness Index (CAI) scoring and classification.
//!
//! A [`ScoringPolicy`] holds every threshold; [`ScoringContext`] bundles the
//! policy with the normalizer, compiled matcher and IDF model a scoring run
//! shares read-only across workers.

mod policy;
mod scorer;

pub use policy::{
    DEFAULT_ARTICLES_PER_YEAR, ScoringPolicy, UNSEEN_TERM_WEIGHT, article_cai, is_climate_aware,
};
pub(crate) use policy::round_cai;
pub use scorer::{ArticleScore, ScoringContext, score_corpus, score_document};
