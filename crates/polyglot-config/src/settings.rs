//! Application settings for the Polyglot HTTP server.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::format::PolyglotOptions;

/// Root configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    #[validate]
    pub server: ServerSettings,
    /// Translation engine settings
    #[validate]
    pub i18n: I18nSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind (`127.0.0.1:3000`)
    #[validate(length(min = 1))]
    pub bind_address: String,
    /// Key rendered by `GET /api`
    #[validate(length(min = 1))]
    pub message_key: String,
}

/// Translation engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Eagerly loaded locale
    #[validate(length(min = 2))]
    pub default_locale: String,
    /// Directory scanned for `<locale>.json` / `<locale>.ftl` translation files
    pub locales_dir: Option<PathBuf>,
    /// Formatter configuration applied to every bundle
    pub formatting: PolyglotOptions,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive (`info`, `polyglot_i18n=debug`)
    pub level: String,
    /// Emit JSON lines
    pub json: bool,
}

impl AppConfig {
    /// Validate the whole tree, including per-locale formatter overrides.
    pub fn validate_all(&self) -> Result<(), crate::ConfigError> {
        self.validate()?;
        self.i18n.formatting.validate_all()?;
        Ok(())
    }
}
