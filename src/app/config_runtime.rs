//! Effective settings: CLI flags over config file over built-in defaults.

use anyhow::{Result, bail};
use clicha_core::{
    DEFAULT_ARTICLES_PER_YEAR, DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY, DEFAULT_MIN_DOCUMENTS,
    NormalizationMode, ScoringPolicy,
};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::GlobalArgs;

/// Settings every command runs with once flags and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub normalization: NormalizationMode,
    pub concurrency: usize,
    pub chunk_size: usize,
    pub articles_per_year: usize,
    pub min_documents: usize,
    pub policy: ScoringPolicy,
    pub verbosity: VerbositySetting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            normalization: NormalizationMode::default(),
            concurrency: DEFAULT_CONCURRENCY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            articles_per_year: DEFAULT_ARTICLES_PER_YEAR,
            min_documents: DEFAULT_MIN_DOCUMENTS,
            policy: ScoringPolicy::default(),
            verbosity: VerbositySetting::Default,
        }
    }
}

/// Merges CLI flags, the optional config file and defaults.
///
/// Per-command overrides (`--articles-per-year`, `--min-documents`) are
/// applied by the commands themselves on top of these settings.
pub(crate) fn resolve_settings(
    args: &GlobalArgs,
    file_config: Option<&FileConfig>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_config) = file_config {
        if let Some(mode) = file_config.normalization {
            settings.normalization = mode;
        }
        if let Some(concurrency) = file_config.concurrency {
            settings.concurrency = usize::from(concurrency);
        }
        if let Some(chunk_size) = file_config.chunk_size {
            settings.chunk_size = to_usize("chunk_size", chunk_size)?;
        }
        if let Some(articles) = file_config.articles_per_year {
            settings.articles_per_year = to_usize("articles_per_year", articles)?;
        }
        if let Some(min_documents) = file_config.min_documents {
            settings.min_documents = to_usize("min_documents", min_documents)?;
        }
        if let Some(value) = file_config.aware_min_distinct {
            settings.policy.aware_min_distinct = to_usize("aware_min_distinct", value)?;
        }
        if let Some(value) = file_config.aware_min_total {
            settings.policy.aware_min_total = to_usize("aware_min_total", value)?;
        }
        if let Some(value) = file_config.aware_min_cai {
            settings.policy.aware_min_cai = value;
        }
        if let Some(value) = file_config.cai_min_distinct {
            settings.policy.cai_min_distinct = to_usize("cai_min_distinct", value)?;
        }
        if let Some(value) = file_config.unseen_term_weight {
            settings.policy.unseen_term_weight = value;
        }
        if let Some(verbosity) = file_config.verbosity {
            settings.verbosity = verbosity;
        }
    }

    if let Some(mode) = args.normalization {
        settings.normalization = mode;
    }
    if let Some(concurrency) = args.concurrency {
        settings.concurrency = usize::from(concurrency);
    }
    if let Some(chunk_size) = args.chunk_size {
        settings.chunk_size = to_usize("chunk-size", chunk_size)?;
    }
    if args.quiet {
        settings.verbosity = VerbositySetting::Quiet;
    } else if args.verbose == 1 {
        settings.verbosity = VerbositySetting::Verbose;
    } else if args.verbose > 1 {
        settings.verbosity = VerbositySetting::Debug;
    }

    if !(1..=100).contains(&settings.concurrency) {
        bail!(
            "Invalid effective concurrency value: {}. Expected range: 1..=100",
            settings.concurrency
        );
    }

    Ok(settings)
}

fn to_usize(field: &str, value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| anyhow::anyhow!("Value for `{field}` is too large: {value}"))
}

pub(crate) fn resolve_default_log_level(settings: &Settings) -> &'static str {
    match settings.verbosity {
        VerbositySetting::Quiet => "error",
        VerbositySetting::Default => "info",
        VerbositySetting::Verbose => "debug",
        VerbositySetting::Debug => "trace",
    }
}

/// Explicit verbosity flags override `RUST_LOG`.
pub(crate) fn should_force_cli_log_level(args: &GlobalArgs) -> bool {
    args.verbose > 0 || args.quiet
}
