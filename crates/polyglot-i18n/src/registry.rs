//! Translation-map registry: the default builder plus one source per
//! supported locale.

use crate::error::{I18nError, I18nResult};
use crate::formatters::FormatterBundle;
use crate::locale::Locale;
use crate::translation::{MapBuilder, TranslationMap};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// What a deferred loader yields: a module whose `default` export builds the
/// locale's map.
#[derive(Clone)]
pub struct TranslationModule {
    /// Map builder
    pub default: MapBuilder,
}

impl TranslationModule {
    /// Wrap a builder function
    pub fn new<F>(builder: F) -> Self
    where
        F: Fn(&FormatterBundle) -> TranslationMap + Send + Sync + 'static,
    {
        Self {
            default: Arc::new(builder),
        }
    }

    /// A module that ignores the formatters and always yields `map`
    pub fn from_map(map: TranslationMap) -> Self {
        Self::new(move |_| map.clone())
    }
}

impl fmt::Debug for TranslationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TranslationModule { .. }")
    }
}

/// Asynchronously produces a locale's translation module.
#[async_trait]
pub trait LanguageLoader: Send + Sync {
    /// Load the module for `locale`
    async fn load(&self, locale: &Locale) -> I18nResult<TranslationModule>;
}

/// Adapts an async closure into a [`LanguageLoader`].
pub struct DeferredLoader<F> {
    load: F,
}

impl<F> DeferredLoader<F> {
    /// Wrap `load`
    pub const fn new(load: F) -> Self {
        Self { load }
    }
}

#[async_trait]
impl<F, Fut> LanguageLoader for DeferredLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = I18nResult<TranslationModule>> + Send + 'static,
{
    async fn load(&self, _locale: &Locale) -> I18nResult<TranslationModule> {
        (self.load)().await
    }
}

/// How a non-default locale's map is obtained.
#[derive(Clone)]
pub enum LanguageSource {
    /// Builder available immediately
    Ready(MapBuilder),
    /// Builder produced by an asynchronous loader
    Deferred(Arc<dyn LanguageLoader>),
}

impl fmt::Debug for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Default locale and builder plus lazily loaded locales.
#[derive(Clone)]
pub struct TranslationRegistry {
    default_locale: Locale,
    default_builder: MapBuilder,
    sources: HashMap<Locale, LanguageSource>,
}

impl TranslationRegistry {
    /// Register the default locale. Its builder runs when the engine is
    /// constructed.
    pub fn new<F>(default_locale: Locale, builder: F) -> Self
    where
        F: Fn(&FormatterBundle) -> TranslationMap + Send + Sync + 'static,
    {
        Self {
            default_locale,
            default_builder: Arc::new(builder),
            sources: HashMap::new(),
        }
    }

    /// Register a lazily loaded locale without invoking its source.
    ///
    /// Registering the default locale again is ignored.
    pub fn register_lazy(&mut self, locale: Locale, source: LanguageSource) {
        if locale == self.default_locale {
            debug!(locale = %locale, "Ignoring lazy registration of the default locale");
            return;
        }
        debug!(locale = %locale, ?source, "Registered language");
        self.sources.insert(locale, source);
    }

    /// Builder-style registration of a ready builder
    #[must_use]
    pub fn with_builder<F>(mut self, locale: Locale, builder: F) -> Self
    where
        F: Fn(&FormatterBundle) -> TranslationMap + Send + Sync + 'static,
    {
        self.register_lazy(locale, LanguageSource::Ready(Arc::new(builder)));
        self
    }

    /// Builder-style registration of a fixed map
    #[must_use]
    pub fn with_map(self, locale: Locale, map: TranslationMap) -> Self {
        self.with_builder(locale, move |_| map.clone())
    }

    /// Builder-style registration of a loader
    #[must_use]
    pub fn with_loader(mut self, locale: Locale, loader: impl LanguageLoader + 'static) -> Self {
        self.register_lazy(locale, LanguageSource::Deferred(Arc::new(loader)));
        self
    }

    /// Builder-style registration of an async closure
    #[must_use]
    pub fn with_deferred<F, Fut>(self, locale: Locale, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = I18nResult<TranslationModule>> + Send + 'static,
    {
        self.with_loader(locale, DeferredLoader::new(load))
    }

    /// The default locale
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// The default locale's builder
    pub fn default_builder(&self) -> &MapBuilder {
        &self.default_builder
    }

    /// Source registered for `locale`
    pub fn source(&self, locale: &Locale) -> Option<&LanguageSource> {
        self.sources.get(locale)
    }

    /// Whether `locale` can be resolved
    pub fn is_registered(&self, locale: &Locale) -> bool {
        *locale == self.default_locale || self.sources.contains_key(locale)
    }

    /// Every resolvable locale, default first, the rest sorted by tag
    pub fn locales(&self) -> Vec<Locale> {
        let mut lazy: Vec<Locale> = self.sources.keys().cloned().collect();
        lazy.sort_by_key(ToString::to_string);
        std::iter::once(self.default_locale.clone())
            .chain(lazy)
            .collect()
    }

    /// Obtain the builder for a non-default locale, running its loader if it
    /// is deferred.
    pub(crate) async fn fetch(&self, locale: &Locale) -> I18nResult<MapBuilder> {
        match self.sources.get(locale) {
            Some(LanguageSource::Ready(builder)) => Ok(Arc::clone(builder)),
            Some(LanguageSource::Deferred(loader)) => {
                debug!(locale = %locale, "Running deferred language loader");
                let module = loader.load(locale).await?;
                Ok(module.default)
            }
            None => Err(I18nError::UnknownLanguage {
                locale: locale.to_string(),
            }),
        }
    }
}

impl fmt::Debug for TranslationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRegistry")
            .field("default_locale", &self.default_locale.to_string())
            .field("locales", &self.sources.len())
            .finish()
    }
}
