//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clicha_core::NormalizationMode;

/// TOML-style file configuration for clicha defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Default term normalization mode.
    pub normalization: Option<NormalizationMode>,
    /// Default number of years processed concurrently (same range as CLI).
    pub concurrency: Option<u8>,
    /// Default number of articles normalized per batch.
    pub chunk_size: Option<u64>,
    /// Articles collected per year; the summary denominator.
    pub articles_per_year: Option<u64>,
    /// Discovery noise threshold: terms need strictly more documents than this.
    pub min_documents: Option<u64>,
    /// Minimum distinct keywords for an aware article.
    pub aware_min_distinct: Option<u64>,
    /// Minimum total keyword occurrences for an aware article.
    pub aware_min_total: Option<u64>,
    /// Minimum CAI for an aware article.
    pub aware_min_cai: Option<f64>,
    /// Minimum distinct keywords for an article's CAI to count toward its year.
    pub cai_min_distinct: Option<u64>,
    /// Weight per occurrence of a term missing from the IDF model.
    pub unseen_term_weight: Option<f64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency
            && !(1..=100).contains(&concurrency)
        {
            bail!("Invalid config value for `concurrency`: {concurrency}. Expected range: 1..=100");
        }

        if let Some(chunk_size) = self.chunk_size
            && !(1..=10_000).contains(&chunk_size)
        {
            bail!("Invalid config value for `chunk_size`: {chunk_size}. Expected range: 1..=10000");
        }

        if let Some(articles_per_year) = self.articles_per_year
            && articles_per_year == 0
        {
            bail!("Invalid config value for `articles_per_year`: 0. Expected a positive integer");
        }

        validate_non_negative_float("aware_min_cai", self.aware_min_cai)?;
        validate_non_negative_float("unseen_term_weight", self.unseen_term_weight)?;

        Ok(())
    }
}

fn validate_non_negative_float(field: &str, value: Option<f64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !value.is_finite() || value < 0.0 {
        bail!("Invalid config value for `{field}`: {value}. Expected a finite non-negative number");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/clicha/config.toml`
/// 2. `$HOME/.config/clicha/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("clicha").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("clicha")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "normalization" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                let mode = parsed
                    .parse::<NormalizationMode>()
                    .map_err(anyhow::Error::msg)
                    .with_context(invalid)?;
                cfg.normalization = Some(mode);
            }
            "concurrency" => {
                cfg.concurrency = Some(parse_integer_u8(value).with_context(invalid)?);
            }
            "chunk_size" => {
                cfg.chunk_size = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "articles_per_year" => {
                cfg.articles_per_year = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "min_documents" => {
                cfg.min_documents = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "aware_min_distinct" => {
                cfg.aware_min_distinct = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "aware_min_total" => {
                cfg.aware_min_total = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "aware_min_cai" => {
                cfg.aware_min_cai = Some(parse_float(value).with_context(invalid)?);
            }
            "cai_min_distinct" => {
                cfg.cai_min_distinct = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "unseen_term_weight" => {
                cfg.unseen_term_weight = Some(parse_float(value).with_context(invalid)?);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_float(raw_value: &str) -> Result<f64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected numeric value");
    }
    Ok(token.parse::<f64>()?)
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
