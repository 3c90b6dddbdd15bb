//! Layered configuration.
//!
//! Settings are assembled from four sources, later ones overriding
//! earlier ones:
//!
//! 1. `default.toml`
//! 2. `{environment}.toml`, picked by the run environment
//! 3. `local.toml`, for uncommitted developer overrides
//! 4. `RESERVO_*` environment variables, with `__` separating levels
//!    (`RESERVO_SERVER__PORT`)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::SettingsLoader;
pub use settings::{DatabaseSettings, JwtSettings, LoggerSettings, ServerSettings, Settings};
