//! Workspace-level error type
//!
//! Each crate keeps its own detailed error (`ConfigError`, `I18nError`) and
//! converts into [`PolyglotError`] at the boundary where callers mix them.

use std::error::Error as StdError;
use thiserror::Error;

/// Result type alias for Polyglot operations
pub type Result<T> = std::result::Result<T, PolyglotError>;

type BoxedSource = Box<dyn StdError + Send + Sync>;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum PolyglotError {
    /// Loading or validating configuration failed
    #[error("Configuration error: {message}")]
    Config {
        /// What was being loaded
        message: String,
        #[source]
        source: BoxedSource,
    },

    /// Resolving a translation failed
    #[error("Localization error: {message}")]
    Localization {
        /// What failed
        message: String,
        /// Locale involved, when known
        locale: Option<String>,
        #[source]
        source: BoxedSource,
    },
}

impl PolyglotError {
    /// Configuration error caused by `source`
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Box::new(source),
        }
    }

    /// Localization error caused by `source`, optionally tied to a locale
    pub fn localization_with_source(
        msg: impl Into<String>,
        locale: Option<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
            source: Box::new(source),
        }
    }

    /// Locale the error refers to
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Localization { locale, .. } => locale.as_deref(),
            Self::Config { .. } => None,
        }
    }
}
