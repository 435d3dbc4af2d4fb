//! Term normalization for corpus statistics and keyword matching.
//!
//! Raw text is segmented on Unicode word boundaries, lowercased, optionally
//! reduced to a base form, and filtered of whitespace, punctuation and
//! stopwords. All state lives in an explicitly constructed [`Normalizer`];
//! build one per run and share it by reference.

mod stopwords;

pub use stopwords::{JOURNALISTIC_OVERRIDES, StopwordSet};

use std::fmt;
use std::str::FromStr;

use rust_stemmers::{Algorithm, Stemmer};
use tracing::instrument;
use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::Document;

/// How tokens are reduced before matching and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationMode {
    /// Lowercase surface form. Cheap; the default for batch scoring.
    #[default]
    Lower,
    /// Lowercased Snowball base form. Well over an order of magnitude slower
    /// on large corpora; use for small or selective discovery runs.
    Lemma,
}

impl NormalizationMode {
    /// Returns the stable string label used in config files and asset headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Lemma => "lemma",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lower" => Ok(Self::Lower),
            "lemma" => Ok(Self::Lemma),
            other => Err(format!(
                "unknown normalization mode '{other}': expected 'lower' or 'lemma'"
            )),
        }
    }
}

/// Turns raw text into normalized terms.
pub struct Normalizer {
    mode: NormalizationMode,
    stopwords: StopwordSet,
    stemmer: Option<Stemmer>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("mode", &self.mode)
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Creates a normalizer with the English stopword list and journalistic overrides.
    #[must_use]
    #[instrument]
    pub fn new(mode: NormalizationMode) -> Self {
        Self::with_stopwords(mode, StopwordSet::english())
    }

    /// Creates a normalizer with a caller-supplied stopword set.
    #[must_use]
    pub fn with_stopwords(mode: NormalizationMode, stopwords: StopwordSet) -> Self {
        let stemmer = match mode {
            NormalizationMode::Lower => None,
            NormalizationMode::Lemma => Some(Stemmer::create(Algorithm::English)),
        };
        Self {
            mode,
            stopwords,
            stemmer,
        }
    }

    #[must_use]
    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    #[must_use]
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Splits text into raw tokens: every non-whitespace word-boundary segment,
    /// punctuation included, with possessive `'s` split off its word.
    #[must_use]
    pub fn tokenize(text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                continue;
            }
            match split_possessive(segment) {
                Some((stem, suffix)) => {
                    tokens.push(stem.to_string());
                    tokens.push(suffix.to_string());
                }
                None => tokens.push(segment.to_string()),
            }
        }
        tokens
    }

    /// Normalizes a single raw token, or returns `None` if it is dropped.
    #[must_use]
    pub fn normalize_token(&self, token: &str) -> Option<String> {
        let trimmed = token.trim();
        if trimmed.is_empty() || !trimmed.chars().any(char::is_alphanumeric) {
            return None;
        }
        let lower = trimmed.to_lowercase();
        if self.stopwords.contains(&lower) {
            return None;
        }
        let Some(stemmer) = &self.stemmer else {
            return Some(lower);
        };
        let base = stemmer.stem(&lower).into_owned();
        if self.stopwords.contains(&base) {
            return None;
        }
        Some(base)
    }

    /// Normalizes raw text into its term sequence.
    #[must_use]
    pub fn normalize(&self, text: &str) -> Vec<String> {
        Self::tokenize(text)
            .iter()
            .filter_map(|token| self.normalize_token(token))
            .collect()
    }

    /// Builds an immutable [`Document`] from one article's text.
    #[must_use]
    pub fn document(&self, source: &str, year: Option<u16>, text: &str) -> Document {
        let raw_terms = Self::tokenize(text);
        let terms = raw_terms
            .iter()
            .filter_map(|token| self.normalize_token(token))
            .collect();
        Document::new(source, year, raw_terms, terms)
    }
}

fn split_possessive(segment: &str) -> Option<(&str, &str)> {
    for suffix in ["'s", "'S", "\u{2019}s", "\u{2019}S"] {
        if let Some(stem) = segment.strip_suffix(suffix)
            && !stem.is_empty()
        {
            return Some((stem, &segment[stem.len()..]));
        }
    }
    None
}
