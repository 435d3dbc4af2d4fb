use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::ProcessExit;
use crate::app::{command_dispatcher, config_runtime, terminal};
use crate::app_config::{VerbositySetting, load_default_file_config};
use crate::cli::Cli;

pub(crate) async fn run() -> Result<ProcessExit> {
    let cli = Cli::parse();

    let loaded_config = load_default_file_config()?;
    let settings = config_runtime::resolve_settings(&cli.global, loaded_config.config.as_ref())?;

    let default_level = config_runtime::resolve_default_log_level(&settings);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&cli.global);
    let no_color = terminal::is_no_color_requested(&cli.global);
    terminal::init_tracing(default_level, force_cli_log_level, no_color);

    debug!(
        config_loaded = loaded_config.loaded_from_file,
        normalization = %settings.normalization,
        concurrency = settings.concurrency,
        chunk_size = settings.chunk_size,
        "CLI arguments parsed"
    );

    let show_progress = terminal::should_show_progress(
        io::stderr().is_terminal(),
        settings.verbosity == VerbositySetting::Quiet,
        terminal::is_dumb_terminal(),
    );

    command_dispatcher::dispatch(&cli, &settings, &loaded_config, show_progress).await
}
