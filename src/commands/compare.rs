//! `clicha compare`: per-year ratios between two datasets' summary reports.

use anyhow::{Context, Result};
use clicha_core::{compare_summaries, read_summary_report};
use tracing::warn;

use super::print_json_lines;

use crate::ProcessExit;
use crate::cli::CompareArgs;

pub fn run_compare_command(args: &CompareArgs) -> Result<ProcessExit> {
    let first = read_summary_report(&args.first)
        .with_context(|| format!("Failed to read summary report '{}'", args.first.display()))?;
    let second = read_summary_report(&args.second)
        .with_context(|| format!("Failed to read summary report '{}'", args.second.display()))?;

    let comparisons = compare_summaries(&first, &second);
    if comparisons.is_empty() {
        warn!("The two summary reports share no years");
    }

    if args.json {
        print_json_lines(&comparisons)?;
        return Ok(ProcessExit::Success);
    }

    println!("year,aware_ratio,cai_ratio");
    for comparison in comparisons {
        println!(
            "{},{},{}",
            comparison.year,
            format_ratio(comparison.aware_ratio),
            format_ratio(comparison.cai_ratio)
        );
    }
    Ok(ProcessExit::Success)
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |value| format!("{value:.4}"))
}
