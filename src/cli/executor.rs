//! Dispatches parsed CLI commands to their handlers.

use super::handlers::{MigrateCommand, ServeCommand};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Runs the command selected on the command line.
///
/// `settings` must already carry the CLI overrides merged in. A serve
/// without `--dry-run` resolves to `Ok(())` here; main owns the actual
/// server startup.
pub async fn dispatch(cli: &Cli, settings: Settings) -> AppResult<()> {
    check_arguments(cli)?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommand::new(settings).run(true).await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommand::new(settings).run(*dry_run, *rollback).await
        }
    }
}

/// Rejects invalid argument combinations and emits advisory warnings
/// for risky but permitted ones.
fn check_arguments(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { host, port, .. }) => {
            warn_on_privileged_bind(host.as_deref(), *port);
        }
        Some(Commands::Migrate { rollback, .. }) => {
            warn_on_large_rollback(*rollback);
        }
        None => {}
    }

    Ok(())
}

fn warn_on_privileged_bind(host: Option<&str>, port: Option<u16>) {
    if let (Some("0.0.0.0"), Some(port)) = (host, port)
        && port < 1024
    {
        eprintln!("Warning: binding 0.0.0.0:{} needs elevated privileges", port);
    }
}

fn warn_on_large_rollback(rollback: Option<u32>) {
    let Some(steps) = rollback else { return };
    if steps > 50 {
        eprintln!("Warning: rolling back {} migrations at once. Consider smaller steps.", steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn runnable_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/reservo_exec".to_string();
        settings.jwt.secret = "a-test-secret-that-spans-32-chars-at-least".to_string();
        settings
    }

    #[tokio::test]
    async fn test_dry_run_serve_succeeds_without_a_server() {
        let cli = Cli::try_parse_from(["reservo", "serve", "--dry-run"]).unwrap();
        assert!(dispatch(&cli, runnable_settings()).await.is_ok());
    }

    #[tokio::test]
    async fn test_plain_serve_defers_to_main() {
        let cli = Cli::try_parse_from(["reservo", "serve"]).unwrap();
        assert!(dispatch(&cli, runnable_settings()).await.is_ok());
    }

    #[test]
    fn test_valid_serve_arguments_pass_checks() {
        let cli = Cli::try_parse_from(["reservo", "serve", "--port", "8080"]).unwrap();
        assert!(check_arguments(&cli).is_ok());
    }

    #[test]
    fn test_programmatic_flag_conflict_is_caught() {
        // clap blocks this combination on the command line; a Cli built
        // in code has to be caught here.
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(2),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        let result = check_arguments(&cli);
        assert!(matches!(
            result,
            Err(AppError::Validation { field, .. }) if field == "cli_arguments"
        ));
    }
}
