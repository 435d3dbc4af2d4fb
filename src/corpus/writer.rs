//! Corpus writer used on the crawler side of the boundary.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{CorpusError, DOCUMENT_DELIMITER};

/// Appends articles to a corpus file in the delimited format
/// [`super::RawDocuments`] reads.
///
/// The file is opened lazily on the first article, in append mode, so
/// several crawl sessions can feed the same file.
#[derive(Debug)]
pub struct CorpusWriter {
    path: PathBuf,
    file: Option<BufWriter<File>>,
    counter: usize,
}

impl CorpusWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            counter: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of articles written since this writer was created.
    #[must_use]
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Writes one article body prefixed by its counter and followed by the
    /// delimiter line.
    ///
    /// # Errors
    /// Returns [`CorpusError::Write`] if the file cannot be opened or written.
    pub fn append_article(&mut self, body: &str) -> Result<(), CorpusError> {
        let counter = self.counter;
        let path = self.path.clone();
        let file = self.ensure_open()?;
        write!(file, "{counter}-> {}\n{DOCUMENT_DELIMITER}\n", body.trim_end())
            .map_err(|source| CorpusError::write(&path, source))?;
        self.counter += 1;
        Ok(())
    }

    /// Writes the `Articles crawled: N` footer and flushes the file.
    ///
    /// Returns the number of articles written.
    ///
    /// # Errors
    /// Returns [`CorpusError::Write`] if the footer cannot be written or flushed.
    #[instrument(skip(self), fields(path = %self.path.display(), articles = self.counter))]
    pub fn finish(mut self) -> Result<usize, CorpusError> {
        let counter = self.counter;
        let path = self.path.clone();
        let file = self.ensure_open()?;
        writeln!(file, "Articles crawled: {counter}")
            .and_then(|()| file.flush())
            .map_err(|source| CorpusError::write(&path, source))?;
        debug!("corpus file closed");
        Ok(counter)
    }

    fn ensure_open(&mut self) -> Result<&mut BufWriter<File>, CorpusError> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .map_err(|source| CorpusError::write(&self.path, source))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|source| CorpusError::write(&self.path, source))?;
            self.file = Some(BufWriter::new(file));
        }
        self.file
            .as_mut()
            .ok_or_else(|| CorpusError::write(&self.path, std::io::ErrorKind::NotFound.into()))
    }
}
