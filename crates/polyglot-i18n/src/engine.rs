//! The translation engine.
//!
//! [`Polyglot`] owns the registry, the language cache and the active state.
//! Lookups against the active locale are synchronous; resolving any other
//! locale may suspend while its loader runs.

use crate::cache::{LanguageCache, LanguageEntry};
use crate::error::{I18nError, I18nResult};
use crate::formatters::FormatterBundle;
use crate::locale::Locale;
use crate::parser::parse;
use crate::registry::TranslationRegistry;
use crate::translation::{Label, Translation, TranslationMap};
use crate::value::Params;
use arc_swap::ArcSwap;
use futures::future::try_join_all;
use polyglot_config::PolyglotOptions;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Default key → the same key
pub type Alias = BTreeMap<String, String>;

/// The active locale and its entry. Replaced wholesale on every switch.
#[derive(Debug, Clone)]
pub struct EngineState {
    language: Locale,
    entry: Arc<LanguageEntry>,
}

impl EngineState {
    /// Active locale
    pub fn language(&self) -> &Locale {
        &self.language
    }

    /// Active entry
    pub fn entry(&self) -> &Arc<LanguageEntry> {
        &self.entry
    }

    /// Active translation map
    pub fn map(&self) -> &Arc<TranslationMap> {
        self.entry.map()
    }

    /// Active formatter bundle
    pub fn formatters(&self) -> &FormatterBundle {
        self.entry.formatters()
    }
}

/// Resolves translation keys for the active locale or any registered one.
pub struct Polyglot {
    registry: TranslationRegistry,
    options: PolyglotOptions,
    default_entry: Arc<LanguageEntry>,
    cache: LanguageCache,
    state: ArcSwap<EngineState>,
    alias: Alias,
}

impl Polyglot {
    /// Build the engine. The default locale's map is built here, before any
    /// lookup can happen.
    pub fn new(registry: TranslationRegistry, options: PolyglotOptions) -> Self {
        let locale = registry.default_locale().clone();
        let config = options.layered(&locale.to_string(), None);
        let formatters = FormatterBundle::new(&locale, &config);
        let map = (registry.default_builder())(&formatters);
        let alias: Alias = map
            .keys()
            .map(|key| (key.to_string(), key.to_string()))
            .collect();

        let default_entry = Arc::new(LanguageEntry::new(locale.clone(), map, formatters));
        let cache = LanguageCache::new();
        cache.insert(Arc::clone(&default_entry));

        info!(
            default_locale = %locale,
            keys = alias.len(),
            languages = registry.locales().len(),
            "Translation engine initialized"
        );

        Self {
            state: ArcSwap::from_pointee(EngineState {
                language: locale,
                entry: Arc::clone(&default_entry),
            }),
            registry,
            options,
            default_entry,
            cache,
            alias,
        }
    }

    /// Look up `key` in the active locale
    pub fn get(
        &self,
        key: &str,
        params: &Params,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Label> {
        let state = self.state.load();
        self.render(state.entry(), key, params, options)
    }

    /// Look up `key` in `locale` without changing the active locale
    pub async fn get_from_language_map(
        &self,
        locale: &Locale,
        key: &str,
        params: &Params,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Label> {
        let entry = self.resolve(locale, options).await?;
        self.render(&entry, key, params, options)
    }

    /// Resolve `locale` and return its entry.
    ///
    /// `options` only take effect if this call is the first to resolve the
    /// locale.
    pub async fn create_language(
        &self,
        locale: &Locale,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Arc<LanguageEntry>> {
        self.resolve(locale, options).await
    }

    /// Resolve `locale` and make it the active locale. On error the active
    /// state is left as it was.
    pub async fn set_language(
        &self,
        locale: &Locale,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Arc<EngineState>> {
        let entry = self.resolve(locale, options).await?;
        let state = Arc::new(EngineState {
            language: locale.clone(),
            entry,
        });
        self.state.store(Arc::clone(&state));
        info!(language = %locale, "Switched active language");
        Ok(state)
    }

    /// Resolve several locales concurrently
    pub async fn preload(&self, locales: &[Locale]) -> I18nResult<Vec<Arc<LanguageEntry>>> {
        try_join_all(locales.iter().map(|locale| self.resolve(locale, None))).await
    }

    /// Default key → key, for every key of the default map
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Active locale
    pub fn language(&self) -> Locale {
        self.state.load().language.clone()
    }

    /// Active state
    pub fn state(&self) -> Arc<EngineState> {
        self.state.load_full()
    }

    /// The default locale
    pub fn default_locale(&self) -> &Locale {
        self.registry.default_locale()
    }

    /// Registered locales
    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }

    /// Engine-wide options
    pub fn options(&self) -> &PolyglotOptions {
        &self.options
    }

    /// Locales resolved so far, the default locale included
    pub fn cached_languages(&self) -> Vec<Locale> {
        self.cache.locales()
    }

    async fn resolve(
        &self,
        locale: &Locale,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Arc<LanguageEntry>> {
        if locale == self.registry.default_locale() {
            return Ok(Arc::clone(&self.default_entry));
        }
        if !self.registry.is_registered(locale) {
            return Err(I18nError::UnknownLanguage {
                locale: locale.to_string(),
            });
        }
        if let Some(entry) = self.cache.get(locale) {
            trace!(locale = %locale, "Language cache hit");
            return Ok(entry);
        }

        self.cache
            .get_or_try_init(locale, || self.load_entry(locale, options))
            .await
    }

    async fn load_entry(
        &self,
        locale: &Locale,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Arc<LanguageEntry>> {
        debug!(locale = %locale, "Language cache miss, loading");
        let builder = self.registry.fetch(locale).await?;
        let config = self.options.layered(&locale.to_string(), options);
        let formatters = FormatterBundle::new(locale, &config);
        let map = builder(&formatters);
        debug!(locale = %locale, keys = map.len(), "Language loaded");
        Ok(Arc::new(LanguageEntry::new(locale.clone(), map, formatters)))
    }

    fn render(
        &self,
        entry: &LanguageEntry,
        key: &str,
        params: &Params,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<Label> {
        let map = entry.map();
        let translation = map
            .get(key)
            .or_else(|| {
                options
                    .and_then(|o| o.fallback.as_deref())
                    .into_iter()
                    .chain(self.options.fallback.as_deref())
                    .find_map(|fallback| map.get(fallback))
            })
            .ok_or_else(|| I18nError::MissingKey {
                key: key.to_string(),
                locale: entry.locale().to_string(),
            })?;

        let label = match translation {
            Translation::Label(label) => label.clone(),
            Translation::Function(function) => function(params, options),
        };

        Ok(match label {
            Label::Text(text) => Label::Text(parse(&text, params, entry.formatters())),
            opaque @ Label::Opaque(_) => opaque,
        })
    }
}

impl fmt::Debug for Polyglot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polyglot")
            .field("default_locale", &self.default_locale().to_string())
            .field("language", &self.language().to_string())
            .field("cached", &self.cache)
            .finish()
    }
}
