//! `clicha idf`: build the IDF model from a reference corpus.

use anyhow::{Context, Result, bail};
use clicha_core::{Normalizer, build_idf_model};
use tracing::info;

use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::cli::IdfArgs;

pub fn run_idf_command(args: &IdfArgs, settings: &Settings) -> Result<ProcessExit> {
    let normalizer = Normalizer::new(settings.normalization);
    let model = build_idf_model(&args.corpus, &normalizer, settings.chunk_size).with_context(|| {
        format!("Failed to build IDF model from '{}'", args.corpus.display())
    })?;

    if model.documents() == 0 {
        bail!(
            "Reference corpus '{}' contains no articles",
            args.corpus.display()
        );
    }
    if model.is_empty() {
        bail!(
            "Reference corpus '{}' contains no terms after normalization",
            args.corpus.display()
        );
    }

    model
        .save(&args.output)
        .with_context(|| format!("Failed to save IDF model '{}'", args.output.display()))?;

    info!(output = %args.output.display(), "IDF model written");
    println!(
        "IDF model: {} terms from {} documents ({}) -> {}",
        model.len(),
        model.documents(),
        settings.normalization,
        args.output.display()
    );
    Ok(ProcessExit::Success)
}
