//! Layered configuration loading.
//!
//! Settings are assembled from TOML files and `RESERVO_*` environment
//! variables. Later sources win, so a deployment can ship a complete
//! `default.toml` and override single keys from the process environment.

use std::path::PathBuf;

use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Assembles [`Settings`] from files and the environment.
///
/// Source precedence, lowest to highest:
/// 1. `default.toml` - required base configuration
/// 2. `{environment}.toml` - per-environment overlay, optional
/// 3. `local.toml` - per-machine overlay, optional, never committed
/// 4. `RESERVO_*` environment variables
///
/// Setting `RESERVO_CONFIG_FILE` replaces the file layers with a single
/// explicit file; the environment variable layer still applies on top.
#[derive(Debug)]
pub struct SettingsLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: Environment,
}

impl SettingsLoader {
    /// Overrides the directory the layered files are read from.
    pub const DIR_ENV: &'static str = "RESERVO_CONFIG_DIR";
    /// Selects single-file mode.
    pub const FILE_ENV: &'static str = "RESERVO_CONFIG_FILE";

    const DEFAULT_DIR: &'static str = "config";
    const ENV_PREFIX: &'static str = "RESERVO";
    const ENV_SEPARATOR: &'static str = "__";

    /// Reads the loader's own control variables and captures the current
    /// application environment.
    ///
    /// # Errors
    ///
    /// `RESERVO_CONFIG_DIR` and `RESERVO_CONFIG_FILE` are mutually
    /// exclusive; setting both is rejected here rather than silently
    /// preferring one.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(Self::DIR_ENV).ok();
        let file_var = std::env::var(Self::FILE_ENV).ok();

        if dir_var.is_some() && file_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "RESERVO_CONFIG_DIR and RESERVO_CONFIG_FILE cannot both be set. \
                 Use RESERVO_CONFIG_DIR for layered configuration or \
                 RESERVO_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DIR)),
            config_file: file_var.map(PathBuf::from),
            environment: Environment::detect(),
        })
    }

    /// Reads, merges and validates all configuration sources.
    ///
    /// # Errors
    ///
    /// Fails when the required base file is missing, any source does not
    /// parse, or the merged result violates [`Settings::validate`].
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        for (path, required) in self.file_sources() {
            if required && !path.exists() {
                return Err(ConfigError::file_not_found(format!(
                    "Required configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                File::new(&path.display().to_string(), FileFormat::Toml).required(required),
            );
        }

        // RESERVO_SERVER__PORT -> server.port, RESERVO_JWT__SECRET -> jwt.secret
        builder = builder.add_source(
            EnvSource::with_prefix(Self::ENV_PREFIX)
                .prefix_separator("_")
                .separator(Self::ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .map_err(ConfigError::from)?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// The file layers to merge, in ascending precedence, paired with
    /// whether each file must exist.
    fn file_sources(&self) -> Vec<(PathBuf, bool)> {
        match &self.config_file {
            Some(file) => vec![(file.clone(), true)],
            None => vec![
                (self.config_dir.join("default.toml"), true),
                (
                    self.config_dir
                        .join(format!("{}.toml", self.environment.as_str())),
                    false,
                ),
                (self.config_dir.join("local.toml"), false),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::{Mutex, PoisonError};
    use tempfile::TempDir;

    // Environment variables are process-global; loader tests take this
    // lock so they cannot observe each other's variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Restores every touched variable on drop. `sandbox()` starts from a
    /// clean slate with the loader's control variables unset.
    struct EnvSandbox {
        saved: Vec<(&'static str, Option<String>)>,
    }

    fn sandbox() -> EnvSandbox {
        let mut sandbox = EnvSandbox { saved: Vec::new() };
        for key in [SettingsLoader::DIR_ENV, SettingsLoader::FILE_ENV, "RESERVO_APP_ENV"] {
            sandbox.unset(key);
        }
        sandbox
    }

    impl EnvSandbox {
        fn set(&mut self, key: &'static str, value: &str) {
            self.saved.push((key, std::env::var(key).ok()));
            unsafe { std::env::set_var(key, value) };
        }

        fn unset(&mut self, key: &'static str) {
            self.saved.push((key, std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
    }

    impl Drop for EnvSandbox {
        fn drop(&mut self) {
            for (key, original) in self.saved.drain(..).rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(key, &value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    // Every field not named here comes from the serde defaults, which
    // already satisfy Settings::validate.
    const BASE: &str = r#"
[application]
name = "loader-probe"

[database]
url = "postgres://localhost/reservo_loader"
"#;

    fn write_config(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write config file");
    }

    fn point_at(env: &mut EnvSandbox, dir: &TempDir) {
        let path = dir.path().to_str().expect("utf-8 temp path").to_string();
        env.set(SettingsLoader::DIR_ENV, &path);
    }

    #[test]
    fn test_defaults_to_config_dir_and_development() {
        let _lock = env_lock();
        let _env = sandbox();

        let loader = SettingsLoader::new().expect("loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment, Environment::Development);
    }

    #[test]
    fn test_control_variables_select_sources() {
        let _lock = env_lock();

        let mut env = sandbox();
        env.set(SettingsLoader::DIR_ENV, "/etc/reservo");
        let loader = SettingsLoader::new().expect("loader");
        assert_eq!(loader.config_dir, PathBuf::from("/etc/reservo"));
        drop(env);

        let mut env = sandbox();
        env.set(SettingsLoader::FILE_ENV, "/etc/reservo/all.toml");
        env.set("RESERVO_APP_ENV", "production");
        let loader = SettingsLoader::new().expect("loader");
        assert_eq!(
            loader.config_file.as_deref(),
            Some(Path::new("/etc/reservo/all.toml"))
        );
        assert_eq!(loader.environment, Environment::Production);
    }

    #[test]
    fn test_dir_and_file_together_are_rejected() {
        let _lock = env_lock();
        let mut env = sandbox();
        env.set(SettingsLoader::DIR_ENV, "/etc/reservo");
        env.set(SettingsLoader::FILE_ENV, "/etc/reservo/all.toml");

        match SettingsLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("RESERVO_CONFIG_DIR"));
                assert!(msg.contains("RESERVO_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_default_toml_is_an_error() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        point_at(&mut env, &dir);

        match SettingsLoader::new().expect("loader").load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_base_file_alone_loads_with_defaults() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        write_config(&dir, "default.toml", BASE);
        point_at(&mut env, &dir);

        let settings = SettingsLoader::new().expect("loader").load().expect("load");
        assert_eq!(settings.application.name, "loader-probe");
        assert_eq!(settings.database.url, "postgres://localhost/reservo_loader");
        // Untouched sections keep their defaults.
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_precedence_files_then_environment() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        write_config(&dir, "default.toml", BASE);
        write_config(
            &dir,
            "test.toml",
            "[server]\nport = 4100\n\n[database]\nurl = \"postgres://localhost/reservo_test\"\n",
        );
        write_config(&dir, "local.toml", "[server]\nport = 4200\n");
        point_at(&mut env, &dir);
        env.set("RESERVO_APP_ENV", "test");
        env.set("RESERVO_SERVER__PORT", "4300");

        let settings = SettingsLoader::new().expect("loader").load().expect("load");
        // The process environment beats local.toml beats test.toml.
        assert_eq!(settings.server.port, 4300);
        // test.toml still wins where nothing later overrides it.
        assert_eq!(settings.database.url, "postgres://localhost/reservo_test");
        // default.toml supplies the rest.
        assert_eq!(settings.application.name, "loader-probe");
    }

    #[test]
    fn test_local_overlay_is_optional() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        write_config(&dir, "default.toml", BASE);
        point_at(&mut env, &dir);
        // staging.toml does not exist either; only default.toml is required.
        env.set("RESERVO_APP_ENV", "staging");

        assert!(SettingsLoader::new().expect("loader").load().is_ok());
    }

    #[test]
    fn test_single_file_mode_skips_layering() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        write_config(
            &dir,
            "standalone.toml",
            "[application]\nname = \"standalone\"\n\n[server]\nport = 4400\n\n\
             [database]\nurl = \"postgres://localhost/reservo_standalone\"\n",
        );
        // A default.toml that must NOT be read in single-file mode.
        write_config(&dir, "default.toml", "[logger]\nlevel = \"error\"\n");
        let file = dir.path().join("standalone.toml");
        env.set(SettingsLoader::FILE_ENV, file.to_str().expect("utf-8 path"));

        let settings = SettingsLoader::new().expect("loader").load().expect("load");
        assert_eq!(settings.application.name, "standalone");
        assert_eq!(settings.server.port, 4400);
        // The layered default.toml was ignored, so the logger level is
        // the built-in default rather than "error".
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_merged_result_is_validated() {
        let _lock = env_lock();
        let mut env = sandbox();
        let dir = TempDir::new().expect("temp dir");
        // Parses fine but fails validation: the database URL is missing.
        write_config(&dir, "default.toml", "[application]\nname = \"invalid\"\n");
        point_at(&mut env, &dir);

        match SettingsLoader::new().expect("loader").load() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "database.url");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
