//! Default values for the application settings.

use crate::format::PolyglotOptions;
use crate::settings::*;

/// Locale loaded eagerly when no configuration names one.
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Address the server binds to by default.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Key rendered by `GET /api` by default.
pub const DEFAULT_MESSAGE_KEY: &str = "welcome";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            i18n: I18nSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            locales_dir: None,
            formatting: PolyglotOptions::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
