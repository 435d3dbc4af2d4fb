//! Climate keyword discovery, curation and the keyword list asset.
//!
//! Discovery contrasts a domain corpus against the reference IDF model and
//! ranks terms by mean TF-IDF. Curation then turns the ranked candidates into
//! the bounded [`KeywordList`] every scoring run loads.

mod curate;
mod discover;
mod error;
mod list;

pub use curate::{CurationRules, curate};
pub use discover::{
    CandidateAccumulator, CandidateKeyword, DEFAULT_MIN_DOCUMENTS, DiscoveryOptions,
    discover_candidates, discover_from_corpora,
};
pub use error::KeywordError;
pub use list::{KeywordList, MAX_KEYWORDS};
