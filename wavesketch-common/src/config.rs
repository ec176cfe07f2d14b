//! Configuration loading and config file resolution
//!
//! The TOML file is bootstrap-only: it supplies defaults that command-line
//! flags and environment variables may override.
//!
//! # Config File Priority
//!
//! 1. Command-line argument (must exist)
//! 2. Environment variable (`WAVESKETCH_CONFIG` by default)
//! 3. `<user config dir>/wavesketch/config.toml`
//! 4. Built-in defaults
//!
//! Missing optional files are not fatal: defaults apply and the returned
//! [`ConfigSource`] carries a warning for the caller to log. Resolution
//! usually runs before the tracing subscriber exists, so nothing is logged
//! from here.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "WAVESKETCH_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TomlConfig {
    /// Rendering defaults (optional)
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rendering defaults
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Fraction of frame samples summarized per output column
    ///
    /// Default: 0.01 (one bucket per hundred frame samples)
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_resolution() -> f64 {
    0.01
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line
    CommandLine(PathBuf),
    /// File named by the environment variable
    Environment(PathBuf),
    /// Environment variable named a file that does not exist; defaults apply
    EnvironmentNotFound { var: String, path: PathBuf },
    /// File found in the platform's user config directory
    UserConfigDir(PathBuf),
    /// No file; compiled-in defaults
    Defaults,
}

impl ConfigSource {
    /// File that supplied the configuration, if one was read
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(path)
            | ConfigSource::Environment(path)
            | ConfigSource::UserConfigDir(path) => Some(path),
            ConfigSource::EnvironmentNotFound { .. } | ConfigSource::Defaults => None,
        }
    }

    /// Warning to report once logging is up, if defaults replaced a named file
    pub fn fallback_warning(&self) -> Option<String> {
        match self {
            ConfigSource::EnvironmentNotFound { var, path } => Some(format!(
                "Config file from {} not found: {} (using defaults)",
                var,
                path.display()
            )),
            _ => None,
        }
    }
}

/// Resolves and loads the configuration file following the priority order
/// documented at module level.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    app_name: String,
    env_var_name: String,
}

impl ConfigResolver {
    /// Create a resolver for the given application directory name
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            env_var_name: CONFIG_ENV_VAR.to_string(),
        }
    }

    /// Override the environment variable consulted at priority 2
    pub fn with_env_var(mut self, env_var_name: &str) -> Self {
        self.env_var_name = env_var_name.to_string();
        self
    }

    /// Default per-user config file path, if the platform has a config dir
    pub fn user_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(&self.app_name).join("config.toml"))
    }

    /// Determine which config file (if any) should be used
    pub fn locate(&self, cli_arg: Option<&Path>) -> ConfigSource {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            return ConfigSource::CommandLine(path.to_path_buf());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        // Priority 3: User config directory
        if let Some(path) = self.user_config_path() {
            if path.exists() {
                return ConfigSource::UserConfigDir(path);
            }
        }

        ConfigSource::Defaults
    }

    /// Locate and load the configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A command-line config path does not exist
    /// - An existing config file cannot be read or parsed
    pub fn load(&self, cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
        let source = match self.locate(cli_arg) {
            ConfigSource::CommandLine(path) if !path.exists() => {
                return Err(Error::InvalidInput(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            ConfigSource::Environment(path) if !path.exists() => ConfigSource::EnvironmentNotFound {
                var: self.env_var_name.clone(),
                path,
            },
            source => source,
        };

        let config = match source.file_path() {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        Ok((config, source))
    }
}
