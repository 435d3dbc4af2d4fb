//! Article corpora: reading delimited corpus files, chunked iteration, and
//! the writer the crawler collaborator uses to produce them.
//!
//! A corpus file holds one article per segment, segments separated by a line
//! consisting of [`DOCUMENT_DELIMITER`]. The first line of a segment is the
//! title (optionally prefixed by the crawler's `N-> ` counter), the rest is
//! the body. A trailing `Articles crawled: N` footer is not an article.

mod document;
mod error;
mod reader;
mod writer;

pub use document::{Document, RawArticle};
pub use error::CorpusError;
pub use reader::{RawDocuments, read_chunked};
pub use writer::CorpusWriter;

/// Literal line separating documents in a corpus file.
pub const DOCUMENT_DELIMITER: &str = "--------";

/// Number of documents normalized together to bound peak memory.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Largest accepted chunk size.
pub const MAX_CHUNK_SIZE: usize = 10_000;
