//! Configuration loading utilities

use polyglot_common::PolyglotError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::settings::AppConfig;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "POLYGLOT_CONFIG_PATH";

/// Configuration files probed, in order, when no path is given
const DEFAULT_CONFIG_FILES: &[&str] = &["polyglot.yaml", "polyglot.yml", "polyglot.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Unsupported configuration file extension
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl From<ConfigError> for PolyglotError {
    fn from(err: ConfigError) -> Self {
        PolyglotError::config_with_source("Configuration loading error", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from `POLYGLOT_CONFIG_PATH`, a default file in the
    /// working directory, or built-in defaults, applying environment overrides
    pub fn load() -> polyglot_common::Result<AppConfig> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = AppConfig::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> polyglot_common::Result<AppConfig> {
        Ok(Self::load_config(path)?)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<AppConfig, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<AppConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("POLYGLOT_BIND_ADDRESS") {
            config.server.bind_address = bind;
        }

        if let Some(key) = lookup("POLYGLOT_MESSAGE_KEY") {
            config.server.message_key = key;
        }

        if let Some(locale) = lookup("POLYGLOT_DEFAULT_LOCALE") {
            config.i18n.default_locale = locale;
        }

        if let Some(dir) = lookup("POLYGLOT_LOCALES_DIR") {
            config.i18n.locales_dir = Some(PathBuf::from(dir));
        }

        if let Some(fallback) = lookup("POLYGLOT_FALLBACK_KEY") {
            config.i18n.formatting.fallback = Some(fallback);
        }

        if let Some(level) = lookup("POLYGLOT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("POLYGLOT_LOG_JSON") {
            config.logging.json = json.parse().map_err(|e| ConfigError::EnvParseError {
                var: "POLYGLOT_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}
