//! CLI command handlers.

mod cai;
mod compare;
mod config;
mod curate;
mod discover;
mod idf;
mod score;
mod summarize;

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clicha_core::{IdfModel, KeywordList, Normalizer, ScoringContext, YearSummary};
use serde::Serialize;

use crate::app::config_runtime::Settings;
use crate::cli::YearRange;

pub use cai::run_cai_command;
pub use compare::run_compare_command;
pub use config::run_config_show_command;
pub use curate::run_curate_command;
pub use discover::run_discover_command;
pub use idf::run_idf_command;
pub use score::run_score_command;
pub use summarize::run_summarize_command;

fn year_range(years: &YearRange) -> Result<RangeInclusive<u16>> {
    if years.from > years.to {
        bail!(
            "Invalid year range: --from {} is after --to {}",
            years.from,
            years.to
        );
    }
    Ok(years.from..=years.to)
}

fn year_file(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("{year}.txt"))
}

/// Loads the IDF model and keyword list up front so a bad asset fails the
/// run before any corpus is touched.
fn load_scoring_context(
    idf_path: &Path,
    keywords_path: &Path,
    settings: &Settings,
) -> Result<ScoringContext> {
    let idf = IdfModel::load(idf_path)
        .with_context(|| format!("Failed to load IDF model '{}'", idf_path.display()))?;
    let keywords = KeywordList::load(keywords_path)
        .with_context(|| format!("Failed to load keyword list '{}'", keywords_path.display()))?;
    Ok(ScoringContext::new(
        Normalizer::new(settings.normalization),
        &keywords,
        idf,
        settings.policy,
    ))
}

fn print_summary_rows(summaries: &[YearSummary], json: bool) -> Result<()> {
    if json {
        return print_json_lines(summaries);
    }
    println!("year,aware_count,cumulative_cai,total_processed");
    for summary in summaries {
        println!(
            "{},{},{},{}",
            summary.year, summary.aware_count, summary.cumulative_cai, summary.total_processed
        );
    }
    Ok(())
}

/// Prints each row as one compact JSON object per line.
fn print_json_lines<T: Serialize>(rows: &[T]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row).context("Failed to serialize output row")?);
    }
    Ok(())
}
