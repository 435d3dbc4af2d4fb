//! The persisted inverse-document-frequency model.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::normalize::NormalizationMode;
use crate::report::write_atomically;

const DOCUMENTS_KEY: &str = "documents";
const NORMALIZATION_KEY: &str = "normalization";

/// Errors that can occur while loading or saving an IDF asset.
#[derive(Debug, Error)]
pub enum IdfModelError {
    /// The asset could not be read.
    #[error(
        "cannot read IDF model '{path}': {source}\n  Suggestion: Build one with `clicha idf <reference-corpus> --output <path>`"
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset could not be written.
    #[error("cannot write IDF model '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed.
    #[error("malformed IDF model '{path}' at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The asset holds no terms.
    #[error("IDF model '{path}' contains no terms")]
    Empty { path: PathBuf },
}

/// Term → IDF weight over a fixed reference corpus.
///
/// Loaded once at process start and shared read-only between workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfModel {
    weights: HashMap<String, f64>,
    documents: usize,
    mode: Option<NormalizationMode>,
}

impl IdfModel {
    /// Builds a model from per-term document counts over `documents` documents.
    #[must_use]
    pub fn from_document_frequencies(
        document_frequency: HashMap<String, usize>,
        documents: usize,
    ) -> Self {
        let corpus_size = documents as f64;
        let weights = document_frequency
            .into_iter()
            .filter(|(_, df)| *df > 0)
            .map(|(term, df)| (term, (corpus_size / df as f64).ln()))
            .collect();
        Self {
            weights,
            documents,
            mode: None,
        }
    }

    /// Builds a model from precomputed weights.
    #[must_use]
    pub fn from_weights<I>(weights: I, documents: usize) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            weights: weights.into_iter().collect(),
            documents,
            mode: None,
        }
    }

    /// Records the normalization mode the weights were computed under.
    #[must_use]
    pub fn with_mode(mut self, mode: NormalizationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Size of the reference corpus the model was built from.
    #[must_use]
    pub fn documents(&self) -> usize {
        self.documents
    }

    #[must_use]
    pub fn mode(&self) -> Option<NormalizationMode> {
        self.mode
    }

    /// Warns when the model was built under a different normalization mode.
    ///
    /// Mixing modes silently turns most matched terms into unseen terms.
    pub fn check_mode(&self, expected: NormalizationMode) {
        if let Some(mode) = self.mode
            && mode != expected
        {
            warn!(
                model_mode = %mode,
                run_mode = %expected,
                "IDF model was built with a different normalization mode"
            );
        }
    }

    /// Loads a `term,idf` asset.
    ///
    /// # Errors
    /// Returns [`IdfModelError`] if the file is missing, unreadable, empty,
    /// or contains a malformed line.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, IdfModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| IdfModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::parse(path, &raw)?;
        info!(terms = model.len(), documents = model.documents, "IDF model loaded");
        Ok(model)
    }

    fn parse(path: &Path, raw: &str) -> Result<Self, IdfModelError> {
        let malformed = |line: usize, reason: String| IdfModelError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut model = Self::default();
        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(header) = trimmed.strip_prefix('#') {
                model.apply_header(header).map_err(|reason| malformed(line_no, reason))?;
                continue;
            }

            let Some((term, value)) = trimmed.rsplit_once(',') else {
                return Err(malformed(line_no, "expected 'term,idf'".to_string()));
            };
            let term = term.trim();
            if term.is_empty() {
                return Err(malformed(line_no, "empty term".to_string()));
            }
            let idf: f64 = value
                .trim()
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid IDF value '{}'", value.trim())))?;
            if !idf.is_finite() || idf < 0.0 {
                return Err(malformed(
                    line_no,
                    format!("IDF must be finite and non-negative, got {idf}"),
                ));
            }
            if model.weights.insert(term.to_string(), idf).is_some() {
                return Err(malformed(line_no, format!("duplicate term '{term}'")));
            }
        }

        if model.weights.is_empty() {
            return Err(IdfModelError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(model)
    }

    /// Applies a `# key = value` metadata line. Free-form comments are ignored.
    fn apply_header(&mut self, header: &str) -> Result<(), String> {
        let Some((key, value)) = header.split_once('=') else {
            return Ok(());
        };
        match key.trim() {
            DOCUMENTS_KEY => {
                self.documents = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid document count '{}'", value.trim()))?;
            }
            NORMALIZATION_KEY => {
                self.mode = Some(value.parse()?);
            }
            other => debug!(key = other, "ignoring unknown IDF model header"),
        }
        Ok(())
    }

    /// Saves the model as a `term,idf` asset sorted by term.
    ///
    /// # Errors
    /// Returns [`IdfModelError::Write`] if the asset cannot be written; no
    /// partial file is left behind.
    #[instrument(skip(self), fields(path = %path.display(), terms = self.len()))]
    pub fn save(&self, path: &Path) -> Result<(), IdfModelError> {
        let mut terms: Vec<(&String, &f64)> = self.weights.iter().collect();
        terms.sort_by(|a, b| a.0.cmp(b.0));

        write_atomically(path, |writer| {
            writeln!(writer, "# {DOCUMENTS_KEY} = {}", self.documents)?;
            if let Some(mode) = self.mode {
                writeln!(writer, "# {NORMALIZATION_KEY} = {mode}")?;
            }
            for (term, idf) in terms {
                writeln!(writer, "{term},{idf}")?;
            }
            Ok(())
        })
        .map_err(|source| IdfModelError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("IDF model saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(raw: &str) -> Result<IdfModel, IdfModelError> {
        IdfModel::parse(Path::new("idf.txt"), raw)
    }

    #[test]
    fn test_parse_reads_headers_and_terms() {
        let model =
            parse("# documents = 40\n# normalization = lemma\nclimat,2.5\nice,0.75\n").unwrap();
        assert_eq!(model.documents(), 40);
        assert_eq!(model.mode(), Some(NormalizationMode::Lemma));
        assert_eq!(model.get("climat"), Some(2.5));
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_parse_term_with_comma_uses_last_field() {
        let model = parse("1,000,3.0\n").unwrap();
        assert_eq!(model.get("1,000"), Some(3.0));
    }

    #[test]
    fn test_parse_ignores_free_comments_and_blank_lines() {
        let model = parse("# built from reuters\n\nsea,1.0\n").unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.mode(), None);
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        let err = parse("ice 0.5\n").unwrap_err();
        assert!(matches!(err, IdfModelError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_negative_and_nan() {
        assert!(matches!(parse("ice,-1\n"), Err(IdfModelError::Malformed { .. })));
        assert!(matches!(parse("ice,NaN\n"), Err(IdfModelError::Malformed { .. })));
        assert!(matches!(parse("ice,abc\n"), Err(IdfModelError::Malformed { .. })));
    }

    #[test]
    fn test_parse_rejects_duplicate_term() {
        let err = parse("ice,1.0\nice,2.0\n").unwrap_err();
        assert!(err.to_string().contains("duplicate term"));
    }

    #[test]
    fn test_parse_rejects_unknown_mode_header() {
        let err = parse("# normalization = stem\nice,1.0\n").unwrap_err();
        assert!(matches!(err, IdfModelError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_asset_is_error() {
        assert!(matches!(parse("# documents = 3\n"), Err(IdfModelError::Empty { .. })));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = IdfModel::load(Path::new("/nonexistent/idf.txt")).unwrap_err();
        assert!(matches!(err, IdfModelError::Read { .. }));
        assert!(err.to_string().contains("Suggestion"));
    }

    #[test]
    fn test_save_then_load_preserves_weights() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets").join("idf.txt");
        let mut df = HashMap::new();
        df.insert("carbon".to_string(), 1);
        df.insert("tax".to_string(), 4);
        let model = IdfModel::from_document_frequencies(df, 4).with_mode(NormalizationMode::Lower);

        model.save(&path).unwrap();
        let loaded = IdfModel::load(&path).unwrap();
        assert_eq!(loaded, model);
        assert!(!path.with_extension("txt.partial").exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("# documents = 4\n# normalization = lower\ncarbon,"));
    }
}
