//! Raw and normalized article representations.

use std::sync::LazyLock;

use regex::Regex;

/// Crawler counter prefix on the first line of each article (`"12-> "`).
#[allow(clippy::expect_used)]
static COUNTER_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+->\s?")
        .expect("counter prefix regex is valid") // Static pattern, safe to panic
});

/// One article as split from a corpus file, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// Zero-based position of the article within its corpus file.
    pub index: usize,
    /// First non-empty line, counter prefix removed.
    pub title: String,
    /// Remaining lines.
    pub body: String,
}

impl RawArticle {
    /// Splits one corpus segment into title and body.
    #[must_use]
    pub fn from_segment(index: usize, segment: &str) -> Self {
        let mut lines = segment.lines().skip_while(|line| line.trim().is_empty());
        let title = lines
            .next()
            .map(|line| COUNTER_PREFIX_PATTERN.replace(line, "").trim().to_string())
            .unwrap_or_default();
        let body = lines.collect::<Vec<_>>().join("\n").trim_end().to_string();
        Self { index, title, body }
    }

    /// Title and body joined as the text to normalize.
    #[must_use]
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.body.trim().is_empty()
    }
}

/// An article's normalized term sequence.
///
/// Built once by [`crate::Normalizer::document`] and never mutated. The raw
/// term sequence keeps every non-whitespace token (punctuation and stopwords
/// included); its length is the document length the scorer divides by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: String,
    year: Option<u16>,
    raw_terms: Vec<String>,
    terms: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new(
        source: &str,
        year: Option<u16>,
        raw_terms: Vec<String>,
        terms: Vec<String>,
    ) -> Self {
        Self {
            source: source.to_string(),
            year,
            raw_terms,
            terms,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    #[must_use]
    pub fn raw_terms(&self) -> &[String] {
        &self.raw_terms
    }

    /// Normalized terms in document order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of normalized terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of raw tokens.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.raw_terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segment_strips_counter_prefix() {
        let article =
            RawArticle::from_segment(3, "\n3-> Arctic ice hits record low\nThe ice shrank.\n");
        assert_eq!(article.index, 3);
        assert_eq!(article.title, "Arctic ice hits record low");
        assert_eq!(article.body, "The ice shrank.");
    }

    #[test]
    fn test_from_segment_without_prefix_keeps_title() {
        let article = RawArticle::from_segment(0, "Plain title\nline one\nline two");
        assert_eq!(article.title, "Plain title");
        assert_eq!(article.body, "line one\nline two");
        assert_eq!(article.text(), "Plain title\nline one\nline two");
    }

    #[test]
    fn test_from_segment_does_not_strip_numbers_inside_title() {
        let article = RawArticle::from_segment(0, "2020 was the hottest year");
        assert_eq!(article.title, "2020 was the hottest year");
    }

    #[test]
    fn test_blank_segment_is_blank() {
        let article = RawArticle::from_segment(0, "\n   \n");
        assert!(article.is_blank());
        assert_eq!(article.text(), "");
    }

    #[test]
    fn test_document_accessors() {
        let doc = Document::new(
            "un",
            None,
            vec!["Ice".into(), ",".into(), "melts".into()],
            vec!["ice".into(), "melts".into()],
        );
        assert_eq!(doc.source(), "un");
        assert_eq!(doc.year(), None);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.raw_len(), 3);
        assert!(!doc.is_empty());
    }
}
