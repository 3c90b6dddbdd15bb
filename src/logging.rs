//! Global `tracing` subscriber setup from [`LoggerSettings`].
//!
//! `RUST_LOG` takes precedence over the configured level so operators
//! can raise verbosity without touching configuration files.

use tracing_subscriber::EnvFilter;

use crate::config::LoggerSettings;
use crate::error::{AppError, AppResult};

/// Installs the global tracing subscriber.
///
/// Must be called once, before any other part of the application logs.
/// A second call fails because the global subscriber is already set.
pub fn init(settings: &LoggerSettings) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let result = match settings.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        "compact" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    result.map_err(|e| AppError::Configuration {
        key: "logger".to_string(),
        source: anyhow::anyhow!("Failed to initialize logging: {}", e),
    })
}
