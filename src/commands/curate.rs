//! `clicha curate`: turn ranked candidates into the final keyword list.

use anyhow::{Context, Result, bail};
use clicha_core::{CurationRules, curate, read_candidate_report};
use tracing::info;

use crate::ProcessExit;
use crate::cli::CurateArgs;

pub fn run_curate_command(args: &CurateArgs) -> Result<ProcessExit> {
    let candidates = read_candidate_report(&args.candidates).with_context(|| {
        format!("Failed to read candidate report '{}'", args.candidates.display())
    })?;

    let rules = match &args.rules {
        Some(path) => CurationRules::load(path)
            .with_context(|| format!("Failed to load curation rules '{}'", path.display()))?,
        None => CurationRules::bundled().context("Bundled curation rules are invalid")?,
    };

    let keywords = curate(&candidates, &rules);
    if keywords.is_empty() {
        bail!(
            "No keywords survived curation of '{}'",
            args.candidates.display()
        );
    }

    keywords
        .save(&args.output)
        .with_context(|| format!("Failed to save keyword list '{}'", args.output.display()))?;

    info!(
        candidates = candidates.len(),
        keywords = keywords.len(),
        false_positives = rules.false_positive_count(),
        "keyword list written"
    );
    println!("{} keywords -> {}", keywords.len(), args.output.display());
    Ok(ProcessExit::Success)
}
