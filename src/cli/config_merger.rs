//! Applies command-line overrides on top of loaded configuration.
//!
//! Precedence, lowest to highest: configuration files, environment
//! variables (both handled by the loader), then CLI flags. The merged
//! result is re-validated before use.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::SettingsLoader;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Combines a loaded [`Settings`] base with CLI argument overrides.
pub struct SettingsMerger {
    base: Settings,
}

impl SettingsMerger {
    pub fn new(base: Settings) -> Self {
        Self { base }
    }

    /// Builds a merger from an explicit config file, or from the
    /// default layered loader when no file was given.
    pub fn from_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match config_path {
            Some(path) => {
                check_file_access(path)?;
                load_single_file(path)?
            }
            None => SettingsLoader::new()?.load()?,
        };

        Ok(Self::new(settings))
    }

    /// Returns a copy of the base settings with CLI overrides applied
    /// and validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut settings = self.base.clone();

        if cli.verbose {
            settings.logger.level = "debug".to_string();
        } else if cli.quiet {
            settings.logger.level = "error".to_string();
        }

        // Migrate takes no overrides; only serve adjusts the merged settings.
        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
            // The per-command flag wins over global --verbose/--quiet.
            if let Some(level) = log_level {
                settings.logger.level = level.as_str().to_string();
            }
        }

        settings.validate()?;

        Ok(settings)
    }

    /// The base settings before any CLI overrides.
    pub fn config(&self) -> &Settings {
        &self.base
    }
}

/// Checks existence and readability up front so the error names the
/// file instead of surfacing a generic parse failure.
fn check_file_access(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::validation(
            "config_file",
            format!("Configuration file does not exist: '{}'", path.display()),
        ));
    }

    if !path.is_file() {
        return Err(ConfigError::validation(
            "config_file",
            format!("Configuration path is not a file: '{}'", path.display()),
        ));
    }

    std::fs::File::open(path).map(drop).map_err(|e| {
        ConfigError::validation(
            "config_file",
            format!("Cannot read configuration file '{}': {}", path.display(), e),
        )
    })
}

/// Loads exactly one file by routing the loader through its file
/// control variable, which is cleared again afterwards.
fn load_single_file(path: &Path) -> Result<Settings, ConfigError> {
    unsafe {
        std::env::set_var(SettingsLoader::FILE_ENV, path);
    }

    let result = SettingsLoader::new().and_then(|loader| loader.load());

    unsafe {
        std::env::remove_var(SettingsLoader::FILE_ENV);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/reservo_merge".to_string();
        settings
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        SettingsMerger::new(base_settings()).merge_cli_args(&cli)
    }

    #[test]
    fn test_config_returns_the_unmerged_base() {
        let settings = base_settings();
        let merger = SettingsMerger::new(settings.clone());
        assert_eq!(merger.config(), &settings);
    }

    #[test]
    fn test_no_flags_leave_settings_untouched() {
        let merged = merge(&["reservo", "serve"]).unwrap();
        assert_eq!(merged, base_settings());
    }

    #[test]
    fn test_verbose_and_quiet_adjust_log_level() {
        assert_eq!(merge(&["reservo", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["reservo", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_flags_override_server_section() {
        let merged = merge(&["reservo", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
        assert_eq!(merged.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_command_log_level_beats_global_verbose() {
        let merged = merge(&["reservo", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_settings_are_validated() {
        // Default settings carry no database URL, which must fail.
        let cli = Cli::try_parse_from(["reservo", "serve"]).unwrap();
        let result = SettingsMerger::new(Settings::default()).merge_cli_args(&cli);

        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "database.url"
        ));
    }

    #[test]
    fn test_missing_config_file_is_reported_by_name() {
        let result = check_file_access(Path::new("/definitely/not/here.toml"));
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, message })
                if field == "config_file" && message.contains("does not exist")
        ));
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_file_access(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, message })
                if field == "config_file" && message.contains("not a file")
        ));
    }
}
