//! Stopword set used by the normalizer.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};
use tracing::instrument;

/// Non-content words specific to journalistic text, added on top of the
/// standard English list.
pub const JOURNALISTIC_OVERRIDES: &[&str] = &["Mr.", "Ms.", "Mrs.", "say", "'s", "Dr."];

/// Lowercased set of words dropped during normalization.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Creates the standard English stopword list extended with
    /// [`JOURNALISTIC_OVERRIDES`].
    #[must_use]
    #[instrument]
    pub fn english() -> Self {
        let mut set = Self::default();
        set.extend(get(LANGUAGE::English).iter().map(|word| word.to_string()));
        set.extend(JOURNALISTIC_OVERRIDES.iter().map(|word| (*word).to_string()));
        set
    }

    /// Creates a set from arbitrary words (used by tests and custom pipelines).
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(words.into_iter().map(|word| word.as_ref().to_string()));
        set
    }

    /// Adds words to the set.
    ///
    /// Entries are lowercased. An entry ending in `.` (titles such as `Mr.`) is
    /// also stored without the period, since the tokenizer splits the period
    /// off. A `'s` entry also covers the typographic `’s`.
    pub fn extend<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        for word in words {
            let lower = word.trim().to_lowercase();
            if lower.is_empty() {
                continue;
            }
            let without_period = lower.trim_end_matches('.');
            if !without_period.is_empty() && without_period != lower {
                self.words.insert(without_period.to_string());
            }
            if lower.contains('\'') {
                self.words.insert(lower.replace('\'', "\u{2019}"));
            }
            self.words.insert(lower);
        }
    }

    /// Returns true if `word` (compared lowercase) is a stopword.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
