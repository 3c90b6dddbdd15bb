//! Error type for configuration loading and validation.

use thiserror::Error;

/// Anything that can go wrong between reading configuration sources and
/// producing validated [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable carries an unusable value.
    #[error("environment variable error: {0}")]
    EnvVarError(String),

    /// A required configuration file is missing.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// A source was found but could not be deserialized.
    #[error("could not parse configuration: {0}")]
    ParseError(String),

    /// A setting carries a value outside its allowed range.
    #[error("invalid setting {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Two configuration sources were requested that cannot be combined.
    #[error("conflicting options: {0}")]
    MutualExclusivityError(String),

    /// Passthrough for errors raised inside the `config` crate.
    #[error("configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        Self::MutualExclusivityError(message.into())
    }
}
