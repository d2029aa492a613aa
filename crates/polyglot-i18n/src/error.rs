//! Error types for translation resolution

use polyglot_common::PolyglotError;
use thiserror::Error;

/// Errors that can occur while resolving locales or translation keys
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// The locale is neither the default locale nor registered
    #[error("Language not found: {locale}")]
    UnknownLanguage { locale: String },

    /// The key is absent from the resolved map and no fallback applies
    #[error("Missing translation key '{key}' for locale {locale}")]
    MissingKey { key: String, locale: String },

    /// A deferred loader rejected
    #[error("Failed to load translations for locale {locale}: {source}")]
    LoaderFailed {
        locale: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read a resource file
    #[error("Failed to load resource file: {path}")]
    ResourceLoadError { path: String },

    /// Failed to parse a JSON or Fluent resource
    #[error("Failed to parse resource {path}: {errors:?}")]
    ResourceParseError { path: String, errors: Vec<String> },

    /// A Fluent construct that has no template equivalent
    #[error("Unsupported expression in message '{key}': {expression}")]
    UnsupportedExpression { key: String, expression: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl I18nError {
    /// Wrap an error raised by a custom loader
    pub fn loader_failed(
        locale: impl ToString,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::LoaderFailed {
            locale: locale.to_string(),
            source: source.into(),
        }
    }

    /// Locale the error refers to, when there is one
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::UnknownLanguage { locale }
            | Self::MissingKey { locale, .. }
            | Self::LoaderFailed { locale, .. } => Some(locale),
            _ => None,
        }
    }
}

impl From<I18nError> for PolyglotError {
    fn from(err: I18nError) -> Self {
        match err.locale().map(str::to_string) {
            Some(locale) => {
                PolyglotError::localization_with_source(err.to_string(), Some(locale), err)
            }
            None => PolyglotError::localization_with_source("Translation resolution failed", None, err),
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_is_carried() {
        let err = I18nError::MissingKey {
            key: "welcome".to_string(),
            locale: "pt-BR".to_string(),
        };
        assert_eq!(err.locale(), Some("pt-BR"));
        assert_eq!(
            err.to_string(),
            "Missing translation key 'welcome' for locale pt-BR"
        );
    }

    #[test]
    fn test_conversion_to_polyglot_error() {
        let err: PolyglotError = I18nError::UnknownLanguage {
            locale: "xx-XX".to_string(),
        }
        .into();
        match err {
            PolyglotError::Localization { locale, .. } => assert_eq!(locale.as_deref(), Some("xx-XX")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err: PolyglotError = I18nError::InvalidLanguageId("??".to_string()).into();
        assert!(matches!(err, PolyglotError::Localization { locale: None, .. }));
    }

    #[test]
    fn test_loader_failed_wraps_source() {
        let err = I18nError::loader_failed("en-US", "network down");
        assert!(err.to_string().contains("network down"));
        assert_eq!(err.locale(), Some("en-US"));
    }
}
