//! Streaming corpus reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use super::{CorpusError, DOCUMENT_DELIMITER, MAX_CHUNK_SIZE, RawArticle};

/// Footer the crawler writes when it closes a corpus file.
#[allow(clippy::expect_used)]
static FOOTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Articles crawled: \d+$")
        .expect("corpus footer regex is valid") // Static pattern, safe to panic
});

/// Iterator over the raw articles of a corpus, one segment at a time.
///
/// Only the current segment is held in memory. Invalid UTF-8 is replaced
/// rather than rejected, since crawled text is frequently mis-encoded.
#[derive(Debug)]
pub struct RawDocuments<R> {
    reader: R,
    buffer: Vec<u8>,
    next_index: usize,
    finished: bool,
}

impl RawDocuments<BufReader<File>> {
    /// Opens a corpus file for streaming.
    ///
    /// # Errors
    /// Returns [`CorpusError::Read`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CorpusError> {
        let file = File::open(path).map_err(|source| CorpusError::read(path, source))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RawDocuments<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            next_index: 0,
            finished: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buffer);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn emit(&mut self, segment: &str) -> RawArticle {
        let article = RawArticle::from_segment(self.next_index, segment);
        self.next_index += 1;
        article
    }
}

impl<R: BufRead> Iterator for RawDocuments<R> {
    type Item = io::Result<RawArticle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut segment = String::new();
        let mut at_segment_start = true;
        loop {
            match self.read_line() {
                Ok(Some(line)) => {
                    let trimmed = line.trim();
                    if trimmed == DOCUMENT_DELIMITER {
                        return Some(Ok(self.emit(&segment)));
                    }
                    // Appended crawl sessions leave a footer at the start of the next segment.
                    if at_segment_start && FOOTER_PATTERN.is_match(trimmed) {
                        continue;
                    }
                    if !trimmed.is_empty() {
                        at_segment_start = false;
                    }
                    segment.push_str(&line);
                    segment.push('\n');
                }
                Ok(None) => {
                    self.finished = true;
                    if segment.trim().is_empty() {
                        return None;
                    }
                    return Some(Ok(self.emit(&segment)));
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Streams a corpus file and hands its articles to `on_chunk` in batches of
/// at most `chunk_size`.
///
/// Returns the number of articles read.
///
/// # Errors
/// Returns [`CorpusError::InvalidChunkSize`] for a chunk size outside
/// `1..=MAX_CHUNK_SIZE`, and [`CorpusError::Read`] if the file cannot be read.
#[instrument(skip(on_chunk), fields(path = %path.display()))]
pub fn read_chunked<F>(
    path: &Path,
    chunk_size: usize,
    mut on_chunk: F,
) -> Result<usize, CorpusError>
where
    F: FnMut(Vec<RawArticle>),
{
    if !(1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        return Err(CorpusError::InvalidChunkSize { value: chunk_size });
    }

    let mut total = 0;
    let mut chunk = Vec::with_capacity(chunk_size);
    for article in RawDocuments::open(path)? {
        let article = article.map_err(|source| CorpusError::read(path, source))?;
        chunk.push(article);
        if chunk.len() == chunk_size {
            total += chunk.len();
            debug!(articles = total, "corpus chunk ready");
            on_chunk(std::mem::replace(&mut chunk, Vec::with_capacity(chunk_size)));
        }
    }
    if !chunk.is_empty() {
        total += chunk.len();
        on_chunk(chunk);
    }

    debug!(articles = total, "corpus read complete");
    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn articles(text: &str) -> Vec<RawArticle> {
        RawDocuments::new(Cursor::new(text.as_bytes().to_vec()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_splits_on_delimiter_line() {
        let docs = articles("0-> First\nbody one\n--------\n1-> Second\nbody two\n--------\n");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "First");
        assert_eq!(docs[1].index, 1);
        assert_eq!(docs[1].body, "body two");
    }

    #[test]
    fn test_skips_trailing_footer() {
        let docs = articles("0-> Only\nbody\n--------\nArticles crawled: 1\n");
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_skips_footer_between_appended_sessions() {
        let docs = articles(
            "0-> A\nx\n--------\nArticles crawled: 1\n0-> B\ny\n--------\nArticles crawled: 1\n",
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].title, "B");
        assert_eq!(docs[1].index, 1);
    }

    #[test]
    fn test_last_segment_without_delimiter_is_kept() {
        let docs = articles("First\n--------\nSecond\nno trailing delimiter");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].body, "no trailing delimiter");
    }

    #[test]
    fn test_empty_middle_segment_keeps_its_index() {
        let docs = articles("A\n--------\n\n--------\nC\n--------\n");
        assert_eq!(docs.len(), 3);
        assert!(docs[1].is_blank());
        assert_eq!(docs[2].index, 2);
    }

    #[test]
    fn test_delimiter_with_crlf_line_endings() {
        let docs = articles("A\r\nbody\r\n--------\r\nB\r\n");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].body, "body");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut bytes = b"Caf".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"\n--------\n");
        let docs: Vec<_> = RawDocuments::new(Cursor::new(bytes))
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].title.starts_with("Caf"));
    }

    #[test]
    fn test_read_chunked_batches_articles() {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..5 {
            writeln!(file, "{i}-> title {i}\nbody\n--------").unwrap();
        }
        let mut sizes = Vec::new();
        let total = read_chunked(file.path(), 2, |chunk| sizes.push(chunk.len())).unwrap();
        assert_eq!(total, 5);
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_read_chunked_rejects_zero_chunk_size() {
        let file = NamedTempFile::new().unwrap();
        let err = read_chunked(file.path(), 0, |_| {}).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidChunkSize { value: 0 }));
    }

    #[test]
    fn test_read_chunked_missing_file_errors() {
        let err = read_chunked(Path::new("/nonexistent/corpus.txt"), 10, |_| {}).unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }
}
