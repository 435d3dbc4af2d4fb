//! `clicha score`: score yearly corpora concurrently and write per-year match reports.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clicha_core::{
    AggregateError, MatchRecord, ScoringContext, YearSummary, YearlyEngine, score_corpus,
    write_match_report, write_summary_report,
};
use tracing::{info, instrument};

use super::{load_scoring_context, print_summary_rows, year_file, year_range};
use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::app::{exit_handler, progress_manager};
use crate::cli::ScoreArgs;

pub async fn run_score_command(
    args: &ScoreArgs,
    settings: &Settings,
    show_progress: bool,
) -> Result<ProcessExit> {
    let years = year_range(&args.years)?;
    let context = Arc::new(load_scoring_context(&args.idf, &args.keywords, settings)?);
    let quota = args.articles_per_year.unwrap_or(settings.articles_per_year);
    let engine = YearlyEngine::new(settings.concurrency)?;

    let progress = progress_manager::year_progress(show_progress, years.clone().count(), "Scoring");
    let job = {
        let context = Arc::clone(&context);
        let dataset_dir = args.dataset_dir.clone();
        let report_dir = args.report_dir.clone();
        let chunk_size = settings.chunk_size;
        let progress = progress.clone();
        move |year: u16| {
            let result = score_year(&context, &dataset_dir, &report_dir, year, chunk_size, quota);
            progress.inc(1);
            result
        }
    };
    let (outcomes, stats) = engine.run(years, job).await?;
    progress.finish_and_clear();

    let mut summaries = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome.result {
            Ok(summary) => summaries.push(summary),
            Err(error) => eprintln!("Year {} failed: {error}", outcome.year),
        }
    }

    if let Some(summary_path) = &args.summary
        && !summaries.is_empty()
    {
        write_summary_report(summary_path, &summaries).with_context(|| {
            format!("Failed to write summary report '{}'", summary_path.display())
        })?;
        info!(path = %summary_path.display(), years = summaries.len(), "summary report written");
    }

    print_summary_rows(&summaries, args.json)?;
    Ok(exit_handler::determine_exit_outcome(
        stats.completed(),
        stats.failed(),
    ))
}

#[instrument(skip(context, dataset_dir, report_dir))]
fn score_year(
    context: &ScoringContext,
    dataset_dir: &Path,
    report_dir: &Path,
    year: u16,
    chunk_size: usize,
    quota: usize,
) -> Result<YearSummary, AggregateError> {
    let corpus = year_file(dataset_dir, year);
    let scores = score_corpus(context, &corpus, Some(year), chunk_size)?;
    write_match_report(&year_file(report_dir, year), &scores)?;
    let records: Vec<MatchRecord> = scores.iter().map(MatchRecord::from).collect();
    Ok(YearSummary::from_records(
        year,
        &records,
        quota,
        context.policy(),
    ))
}
