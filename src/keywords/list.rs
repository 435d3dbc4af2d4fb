//! The ranked keyword list asset.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use super::KeywordError;
use crate::report::write_atomically;

/// Maximum number of phrases in a keyword list.
pub const MAX_KEYWORDS: usize = 100;

/// Ordered set of unique keyword phrases; position is rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList {
    phrases: Vec<String>,
}

impl KeywordList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from phrases in rank order.
    ///
    /// Phrases are trimmed, blanks dropped and duplicates collapsed with a
    /// warning, keeping the first occurrence.
    ///
    /// # Errors
    /// Returns [`KeywordError::TooMany`] if more than [`MAX_KEYWORDS`] unique
    /// phrases remain.
    pub fn from_phrases<I, S>(phrases: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut list = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                continue;
            }
            if !seen.insert(phrase.to_lowercase()) {
                warn!(phrase, "duplicate keyword ignored");
                continue;
            }
            list.push(phrase.to_string());
        }
        if list.len() > MAX_KEYWORDS {
            return Err(KeywordError::TooMany { count: list.len() });
        }
        Ok(Self { phrases: list })
    }

    /// Appends `phrase` unless it is blank, already present, or the list is full.
    ///
    /// Returns whether the phrase was added.
    pub fn push(&mut self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        if phrase.is_empty() || self.is_full() || self.contains(phrase) {
            return false;
        }
        self.phrases.push(phrase.to_string());
        true
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        let phrase = phrase.trim().to_lowercase();
        self.phrases.iter().any(|existing| existing.to_lowercase() == phrase)
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.phrases.len() >= MAX_KEYWORDS
    }

    /// Loads a newline-delimited keyword list. Blank and `#` lines are skipped.
    ///
    /// # Errors
    /// Returns [`KeywordError`] if the file is unreadable, empty, or holds
    /// more than [`MAX_KEYWORDS`] phrases.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, KeywordError> {
        let raw = std::fs::read_to_string(path).map_err(|source| KeywordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_phrases(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )?;
        if list.is_empty() {
            return Err(KeywordError::Empty {
                path: path.to_path_buf(),
            });
        }
        info!(keywords = list.len(), "keyword list loaded");
        Ok(list)
    }

    /// Saves the list one phrase per line, in rank order.
    ///
    /// # Errors
    /// Returns [`KeywordError::Write`] if the file cannot be written.
    #[instrument(skip(self), fields(path = %path.display(), keywords = self.len()))]
    pub fn save(&self, path: &Path) -> Result<(), KeywordError> {
        write_atomically(path, |writer| {
            for phrase in &self.phrases {
                writeln!(writer, "{phrase}")?;
            }
            Ok(())
        })
        .map_err(|source| KeywordError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
