//! Corpus statistics: term frequency, inverse document frequency, TF-IDF.
//!
//! The IDF model is computed once over a fixed reference corpus, persisted
//! as a flat `term,idf` asset, and loaded read-only by every scoring run.
//! It is never recomputed against a scoring corpus.

mod frequency;
mod idf_model;

pub use frequency::{
    TermFrequencyMap, UNSEEN_TERM_TF_IDF, build_idf_model, inverse_document_frequency,
    term_frequency, tf_idf, tf_idf_map,
};
pub use idf_model::{IdfModel, IdfModelError};
