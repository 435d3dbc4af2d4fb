//! `clicha discover`: rank candidate keywords from domain corpora.

use std::path::Path;

use anyhow::{Context, Result};
use clicha_core::{
    DiscoveryOptions, IdfModel, Normalizer, discover_from_corpora, write_candidate_report,
};
use tracing::info;

use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::cli::DiscoverArgs;

pub fn run_discover_command(args: &DiscoverArgs, settings: &Settings) -> Result<ProcessExit> {
    let idf = IdfModel::load(&args.idf)
        .with_context(|| format!("Failed to load IDF model '{}'", args.idf.display()))?;
    let normalizer = Normalizer::new(settings.normalization);
    idf.check_mode(normalizer.mode());

    let options = DiscoveryOptions {
        min_documents: args.min_documents.unwrap_or(settings.min_documents),
        ..DiscoveryOptions::default()
    };
    let corpora: Vec<&Path> = args.corpora.iter().map(|path| path.as_path()).collect();

    let candidates =
        discover_from_corpora(&corpora, &normalizer, &idf, &options, settings.chunk_size)
            .context("Failed to read domain corpora")?;

    write_candidate_report(&args.output, &candidates).with_context(|| {
        format!("Failed to write candidate report '{}'", args.output.display())
    })?;

    info!(
        candidates = candidates.len(),
        min_documents = options.min_documents,
        "candidate report written"
    );
    println!(
        "{} candidate keywords -> {}",
        candidates.len(),
        args.output.display()
    );
    Ok(ProcessExit::Success)
}
