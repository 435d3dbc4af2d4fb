//! CLI command routing: runs the subcommand the user invoked and returns its exit outcome.

use anyhow::Result;

use crate::app::config_runtime::Settings;
use crate::app_config::LoadedConfig;
use crate::cli::{Cli, Command, ConfigCommand};
use crate::{ProcessExit, commands};

pub(crate) async fn dispatch(
    cli: &Cli,
    settings: &Settings,
    loaded_config: &LoadedConfig,
    show_progress: bool,
) -> Result<ProcessExit> {
    match &cli.command {
        Command::Idf(args) => commands::run_idf_command(args, settings),
        Command::Discover(args) => commands::run_discover_command(args, settings),
        Command::Curate(args) => commands::run_curate_command(args),
        Command::Score(args) => commands::run_score_command(args, settings, show_progress).await,
        Command::Summarize(args) => {
            commands::run_summarize_command(args, settings, show_progress).await
        }
        Command::Cai(args) => commands::run_cai_command(args, settings),
        Command::Compare(args) => commands::run_compare_command(args),
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                commands::run_config_show_command(settings, loaded_config);
                Ok(ProcessExit::Success)
            }
        },
    }
}
