//! Configuration schema.
//!
//! Everything the loader can read from TOML files or `RESERVO_*`
//! environment variables is modeled here. Every field carries a serde
//! default so partial files stay valid; range checks live in
//! [`validation`](crate::config::validation).

use serde::{Deserialize, Serialize};

/// Fallback values applied when a source omits a key.
mod defaults {
    pub fn app_name() -> String {
        "reservo".to_string()
    }

    pub fn app_version() -> String {
        crate::pkg_version().to_string()
    }

    pub fn host() -> String {
        "127.0.0.1".to_string()
    }

    pub fn port() -> u16 {
        3000
    }

    pub fn request_timeout() -> u64 {
        30
    }

    pub fn keep_alive_timeout() -> u64 {
        75
    }

    pub fn max_connections() -> u32 {
        10
    }

    pub fn min_connections() -> u32 {
        1
    }

    pub fn connection_timeout() -> u64 {
        30
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn log_format() -> String {
        "full".to_string()
    }

    pub fn token_expiration() -> i64 {
        1
    }
}

/// Identity reported in startup logs and the health endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationSettings {
    #[serde(default = "defaults::app_name")]
    pub name: String,
    /// Defaults to the crate version baked in at build time.
    #[serde(default = "defaults::app_version")]
    pub version: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: defaults::app_name(),
            version: defaults::app_version(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    /// Request timeout in seconds.
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout: u64,
    /// Keep-alive timeout in seconds.
    #[serde(default = "defaults::keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerSettings {
    /// The bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            request_timeout: defaults::request_timeout(),
            keep_alive_timeout: defaults::keep_alive_timeout(),
        }
    }
}

/// PostgreSQL pool configuration.
///
/// There is no usable default for `url`; the shipped `default.toml`
/// carries one and validation rejects an empty value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
    #[serde(default = "defaults::min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection before giving up.
    #[serde(default = "defaults::connection_timeout")]
    pub connection_timeout: u64,
    /// Run pending migrations during server startup.
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: defaults::max_connections(),
            min_connections: defaults::min_connections(),
            connection_timeout: defaults::connection_timeout(),
            auto_migrate: false,
        }
    }
}

/// Bearer token issuing and verification.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtSettings {
    /// HMAC signing secret. Empty by default so a deployment must supply
    /// its own, normally through `RESERVO_JWT__SECRET`.
    #[serde(default)]
    pub secret: String,
    /// Token lifetime in hours.
    #[serde(default = "defaults::token_expiration")]
    pub token_expiration: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_expiration: defaults::token_expiration(),
        }
    }
}

/// Tracing subscriber configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerSettings {
    /// One of "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::log_level")]
    pub level: String,
    /// One of "full", "compact", "json".
    #[serde(default = "defaults::log_format")]
    pub format: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            format: defaults::log_format(),
        }
    }
}

/// The fully merged application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub jwt: JwtSettings,
    #[serde(default)]
    pub logger: LoggerSettings,
}
