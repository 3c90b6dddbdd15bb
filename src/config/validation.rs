//! Range and format checks for loaded configuration.
//!
//! Each section owns a `validate` method returning the first violated
//! rule. Field identifiers use the TOML path (`section.key`) so error
//! output points at the line the operator has to fix.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseSettings, JwtSettings, LoggerSettings, ServerSettings, Settings,
};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["full", "compact", "json"];

fn ensure(condition: bool, field: &str, message: impl Into<String>) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::validation(field, message.into()))
    }
}

impl ServerSettings {
    /// Rejects a port of 0 and zero-length timeouts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.port != 0,
            "server.port",
            "Port must be between 1 and 65535. Please specify a valid port number.",
        )?;
        ensure(
            self.request_timeout > 0,
            "server.request_timeout",
            "Request timeout must be greater than 0 seconds.",
        )?;
        ensure(
            self.keep_alive_timeout > 0,
            "server.keep_alive_timeout",
            "Keep-alive timeout must be greater than 0 seconds.",
        )
    }
}

impl DatabaseSettings {
    /// Requires a PostgreSQL URL and a coherent pool size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.url.is_empty(),
            "database.url",
            "Database URL is required. Please specify a valid database connection string.",
        )?;
        // diesel-async is compiled against PostgreSQL only.
        ensure(
            self.url.starts_with("postgres://") || self.url.starts_with("postgresql://"),
            "database.url",
            "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
        )?;
        ensure(
            self.max_connections > 0,
            "database.max_connections",
            "Max connections must be greater than 0.",
        )?;
        ensure(
            self.min_connections > 0,
            "database.min_connections",
            "Min connections must be greater than 0.",
        )?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            format!(
                "Min connections ({}) cannot exceed max connections ({}).",
                self.min_connections, self.max_connections
            ),
        )
    }
}

impl JwtSettings {
    /// Requires a non-trivial signing secret and a positive lifetime.
    ///
    /// Not part of [`Settings::validate`]: the server and the `serve
    /// --dry-run` path call this directly so that offline commands can
    /// run without a secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.secret.is_empty(),
            "jwt.secret",
            "JWT secret is required. Set it via configuration or the RESERVO_JWT__SECRET environment variable.",
        )?;
        ensure(
            self.secret.len() >= 32,
            "jwt.secret",
            "JWT secret must be at least 32 characters long.",
        )?;
        ensure(
            self.token_expiration > 0,
            "jwt.token_expiration",
            "Token expiration must be greater than 0 hours.",
        )
    }
}

impl LoggerSettings {
    /// Level and format must be values the subscriber understands.
    /// Comparison is case-insensitive, matching how they are consumed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            LOG_LEVELS.contains(&self.level.to_lowercase().as_str()),
            "logger.level",
            format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level,
                LOG_LEVELS.join(", ")
            ),
        )?;
        ensure(
            LOG_FORMATS.contains(&self.format.to_lowercase().as_str()),
            "logger.format",
            format!(
                "Invalid log format '{}'. Valid formats are: {}",
                self.format,
                LOG_FORMATS.join(", ")
            ),
        )
    }
}

impl Settings {
    /// Validates the sections every command needs.
    ///
    /// JWT settings are deliberately excluded; `migrate` and other
    /// offline commands must work without a configured secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
