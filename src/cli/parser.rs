//! Command-line interface definition.
//!
//! Declarative clap setup for the `reservo` binary: global flags, the
//! `serve` and `migrate` subcommands, and the value enums they accept.
//! Argument values are checked by the parsers in [`super::validation`].

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shadow_rs::shadow;

shadow!(build);

/// A resource reservation API server
#[derive(Parser, Debug)]
#[command(name = "reservo")]
#[command(about = "A resource reservation API server")]
#[command(long_about = "
Reservo is a reservation management API server. It exposes a JSON API
for registering accounts, managing bookable resources, and placing
reservations against them, backed by PostgreSQL.

Examples:
    # Run with the default configuration
    reservo serve

    # Bind to a different interface and port
    reservo serve --host 0.0.0.0 --port 8080

    # Load a specific configuration file
    reservo --config /path/to/config.toml serve

    # Validate configuration without starting the server
    reservo serve --dry-run

    # Apply pending database migrations
    reservo migrate

    # Preview what migrate would do
    reservo migrate --dry-run

    # Revert the two most recent migrations
    reservo migrate --rollback 2
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML configuration file
    ///
    /// Loads this single file instead of the layered files in the
    /// config directory. The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::parse_config_path)]
    pub config: Option<PathBuf>,

    /// Run environment
    ///
    /// Selects which environment overlay file is loaded. Accepts
    /// development (dev), production (prod) or test; defaults to the
    /// RESERVO_APP_ENV variable, then development.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Debug-level logging
    ///
    /// Cannot be combined with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    ///
    /// Cannot be combined with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (the default when no subcommand is given)
    ///
    /// Binds to the configured address, connects the database pool and
    /// serves the JSON API until interrupted.
    Serve {
        /// Bind address
        ///
        /// Use 127.0.0.1 for localhost only or 0.0.0.0 for all
        /// interfaces. Accepts an IP literal, a hostname, or
        /// 'localhost'.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::parse_host)]
        host: Option<String>,

        /// Bind port (1-65535)
        ///
        /// Ports below 1024 usually need elevated privileges.
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::parse_port)]
        port: Option<u16>,

        /// Log level for this run
        ///
        /// Takes precedence over the configuration file and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Check configuration and exit without binding
        ///
        /// Runs the full configuration check, including the JWT
        /// section. Exit code 0 means the server would start.
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, preview or revert schema migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the N most recent migrations
        ///
        /// Limited to 1 through 100 per invocation.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::parse_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment names accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "prod")]
    Production,
    Test,
}

/// Log levels accepted by `serve --log-level`.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The `tracing` filter string for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Cross-argument checks clap cannot express on its own.
    ///
    /// The conflicts are also declared via `conflicts_with`, so this is
    /// only reachable when the struct is built programmatically.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Migrate { dry_run, rollback }) = &self.command
            && *dry_run
            && rollback.is_some()
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.as_str().to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(value: Environment) -> Self {
        match value {
            Environment::Development => Self::Development,
            Environment::Production => Self::Production,
            Environment::Test => Self::Test,
        }
    }
}
