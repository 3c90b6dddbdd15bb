//! Command-line interface: parsing, configuration merging and command
//! dispatch for the `reservo` binary.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::SettingsMerger;
pub use executor::dispatch;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;

/// Loads configuration files and folds the CLI overrides in, returning
/// validated [`Settings`] ready for command execution.
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let merger =
        SettingsMerger::from_path(cli.config.as_deref()).context("Failed to load configuration")?;

    merger
        .merge_cli_args(cli)
        .context("Failed to apply CLI overrides to configuration")
}
