//! `clicha summarize`: fold existing per-year match reports into a yearly summary.

use anyhow::{Context, Result, bail};
use clicha_core::{
    AggregateError, YearSummary, YearlyEngine, read_match_report, write_summary_report,
};
use tracing::info;

use super::{print_summary_rows, year_file, year_range};
use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::app::{exit_handler, progress_manager};
use crate::cli::SummarizeArgs;

pub async fn run_summarize_command(
    args: &SummarizeArgs,
    settings: &Settings,
    show_progress: bool,
) -> Result<ProcessExit> {
    let years = year_range(&args.years)?;
    let quota = args.articles_per_year.unwrap_or(settings.articles_per_year);
    let policy = settings.policy;
    let engine = YearlyEngine::new(settings.concurrency)?;

    let progress =
        progress_manager::year_progress(show_progress, years.clone().count(), "Summarizing");
    let job = {
        let report_dir = args.report_dir.clone();
        let progress = progress.clone();
        move |year: u16| -> Result<YearSummary, AggregateError> {
            let result = read_match_report(&year_file(&report_dir, year))
                .map(|records| YearSummary::from_records(year, &records, quota, &policy))
                .map_err(AggregateError::from);
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

    if summaries.is_empty() {
        bail!(
            "No match reports could be read from '{}'",
            args.report_dir.display()
        );
    }

    write_summary_report(&args.output, &summaries).with_context(|| {
        format!("Failed to write summary report '{}'", args.output.display())
    })?;
    info!(path = %args.output.display(), years = summaries.len(), "summary report written");

    print_summary_rows(&summaries, args.json)?;
    Ok(exit_handler::determine_exit_outcome(
        stats.completed(),
        stats.failed(),
    ))
}
