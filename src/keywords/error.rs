//! Error types for keyword assets.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::MAX_KEYWORDS;

/// Errors that can occur while loading or saving keyword and curation assets.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// The asset could not be read.
    #[error(
        "cannot read keyword asset '{path}': {source}\n  Suggestion: Generate one with `clicha curate`"
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset could not be written.
    #[error("cannot write keyword asset '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// More phrases than a keyword list may hold.
    #[error("keyword list has {count} entries; at most {MAX_KEYWORDS} are allowed")]
    TooMany { count: usize },

    /// The keyword list holds no phrases.
    #[error("keyword list '{path}' is empty")]
    Empty { path: PathBuf },

    /// A curation rule line could not be parsed.
    #[error(
        "invalid curation rule at line {line}: {reason}\n  Suggestion: Use '- term' for false positives and '+ phrase' for injected phrases"
    )]
    InvalidRule { line: usize, reason: String },
}
