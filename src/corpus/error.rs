//! Error types for corpus file operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::MAX_CHUNK_SIZE;

/// Errors that can occur while reading or writing corpus files.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be opened or read.
    #[error(
        "cannot read corpus '{path}': {source}\n  Suggestion: Check that the crawl output exists for this source and year"
    )]
    Read {
        /// Corpus file path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Appending to a corpus file failed.
    #[error("cannot write corpus '{path}': {source}")]
    Write {
        /// Corpus file path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Chunk size outside the accepted range.
    #[error("invalid chunk size {value}: must be between 1 and {MAX_CHUNK_SIZE}")]
    InvalidChunkSize {
        /// The rejected value
        value: usize,
    },
}

impl CorpusError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
