//! Turning ranked candidates into the final keyword list.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument};

use super::{CandidateKeyword, KeywordError, KeywordList};

/// Rules shipped with the crate, used when no rules file is given.
const BUNDLED_RULES: &str = include_str!("../../assets/curation.txt");

/// False positives to drop and phrases to inject during curation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationRules {
    false_positives: HashSet<String>,
    injected: Vec<String>,
}

impl CurationRules {
    #[must_use]
    pub fn new<'a, F, P>(false_positives: F, injected: P) -> Self
    where
        F: IntoIterator<Item = &'a str>,
        P: IntoIterator<Item = &'a str>,
    {
        let mut rules = Self::empty();
        for term in false_positives {
            rules.add_false_positive(term);
        }
        for phrase in injected {
            rules.add_injected(phrase);
        }
        rules
    }

    /// Parses the rules bundled with the crate (`assets/curation.txt`).
    ///
    /// # Errors
    /// Returns [`KeywordError::InvalidRule`] if the bundled asset was edited
    /// into an invalid state.
    pub fn bundled() -> Result<Self, KeywordError> {
        Self::parse(BUNDLED_RULES)
    }

    fn empty() -> Self {
        Self {
            false_positives: HashSet::new(),
            injected: Vec::new(),
        }
    }

    fn add_false_positive(&mut self, term: &str) {
        self.false_positives.insert(term.trim().to_lowercase());
    }

    fn add_injected(&mut self, phrase: &str) {
        let phrase = phrase.trim();
        if !self.injected.iter().any(|p| p.eq_ignore_ascii_case(phrase)) {
            self.injected.push(phrase.to_string());
        }
    }

    /// Parses `- term` / `+ phrase` lines; blank and `#` lines are skipped.
    ///
    /// # Errors
    /// Returns [`KeywordError::InvalidRule`] for any other line or an empty term.
    pub fn parse(raw: &str) -> Result<Self, KeywordError> {
        let mut rules = Self::empty();
        for (idx, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let invalid = |reason: &str| KeywordError::InvalidRule {
                line: idx + 1,
                reason: reason.to_string(),
            };
            let mut chars = trimmed.chars();
            let marker = chars.next();
            let rest = chars.as_str().trim();
            if rest.is_empty() {
                return Err(invalid("missing term after marker"));
            }
            match marker {
                Some('-') => rules.add_false_positive(rest),
                Some('+') => rules.add_injected(rest),
                _ => return Err(invalid("line must start with '-' or '+'")),
            }
        }
        Ok(rules)
    }

    /// Loads a curation rules asset.
    ///
    /// # Errors
    /// Returns [`KeywordError::Read`] if the file cannot be read and
    /// [`KeywordError::InvalidRule`] for a malformed line.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, KeywordError> {
        let raw = std::fs::read_to_string(path).map_err(|source| KeywordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::parse(&raw)?;
        debug!(
            false_positives = rules.false_positives.len(),
            injected = rules.injected.len(),
            "curation rules loaded"
        );
        Ok(rules)
    }

    #[must_use]
    pub fn is_false_positive(&self, term: &str) -> bool {
        self.false_positives.contains(&term.trim().to_lowercase())
    }

    #[must_use]
    pub fn injected(&self) -> &[String] {
        &self.injected
    }

    #[must_use]
    pub fn false_positive_count(&self) -> usize {
        self.false_positives.len()
    }
}

/// Builds the final keyword list: injected phrases first, then ranked
/// candidates that are not false positives, capped at
/// [`super::MAX_KEYWORDS`].
#[must_use]
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub fn curate(candidates: &[CandidateKeyword], rules: &CurationRules) -> KeywordList {
    let mut list = KeywordList::new();
    for phrase in rules.injected() {
        list.push(phrase);
    }
    for candidate in candidates {
        if list.is_full() {
            break;
        }
        if rules.is_false_positive(&candidate.term) {
            continue;
        }
        list.push(&candidate.term);
    }
    info!(keywords = list.len(), "keyword list curated");
    list
}
