//! Per-locale cache of resolved language entries.

use crate::error::I18nResult;
use crate::formatters::FormatterBundle;
use crate::intl::Collator;
use crate::locale::Locale;
use crate::translation::TranslationMap;
use dashmap::DashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A resolved locale: its map, formatters and comparator. Immutable.
pub struct LanguageEntry {
    locale: Locale,
    map: Arc<TranslationMap>,
    formatters: FormatterBundle,
    comparator: Collator,
}

impl LanguageEntry {
    /// Assemble an entry from a built map and its formatters
    pub fn new(locale: Locale, map: TranslationMap, formatters: FormatterBundle) -> Self {
        Self {
            comparator: Collator::new(locale.clone()),
            locale,
            map: Arc::new(map),
            formatters,
        }
    }

    /// Locale of the entry
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Translation map
    pub fn map(&self) -> &Arc<TranslationMap> {
        &self.map
    }

    /// Formatter bundle
    pub fn formatters(&self) -> &FormatterBundle {
        &self.formatters
    }

    /// String comparator
    pub fn comparator(&self) -> &Collator {
        &self.comparator
    }
}

impl fmt::Debug for LanguageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageEntry")
            .field("locale", &self.locale.to_string())
            .field("keys", &self.map.len())
            .field("formatters", &self.formatters)
            .finish()
    }
}

type Slot = Arc<OnceCell<Arc<LanguageEntry>>>;

/// Locale → entry, append-only. Concurrent first requests for one locale
/// share a single initialization; a failed initialization leaves the slot
/// empty.
#[derive(Default)]
pub struct LanguageCache {
    slots: DashMap<Locale, Slot>,
}

impl LanguageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with an already built entry
    pub fn insert(&self, entry: Arc<LanguageEntry>) {
        let locale = entry.locale().clone();
        self.slots
            .insert(locale, Arc::new(OnceCell::new_with(Some(entry))));
    }

    /// The cached entry for `locale`, if initialized
    pub fn get(&self, locale: &Locale) -> Option<Arc<LanguageEntry>> {
        self.slots
            .get(locale)
            .and_then(|slot| slot.value().get().cloned())
    }

    /// Return the cached entry or run `init` to create it.
    pub async fn get_or_try_init<F, Fut>(&self, locale: &Locale, init: F) -> I18nResult<Arc<LanguageEntry>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = I18nResult<Arc<LanguageEntry>>>,
    {
        // Clone the slot so no map guard is held across the await.
        let slot: Slot = Arc::clone(
            self.slots
                .entry(locale.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );
        slot.get_or_try_init(init).await.map(Arc::clone)
    }

    /// Locales with an initialized entry, sorted by tag
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self
            .slots
            .iter()
            .filter(|slot| slot.value().initialized())
            .map(|slot| slot.key().clone())
            .collect();
        locales.sort_by_key(ToString::to_string);
        locales
    }

    /// Number of initialized entries
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value().initialized())
            .count()
    }

    /// Whether no entry is initialized
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LanguageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageCache")
            .field("locales", &self.locales())
            .finish()
    }
}
