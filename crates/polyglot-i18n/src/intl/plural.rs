//! Plural category selection, delegated to `intl_pluralrules`.

use crate::locale::Locale;
use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules};
use std::fmt;
use tracing::trace;

/// Cardinal or ordinal plural rules for one locale.
pub(crate) struct PluralSelector {
    rules: Option<PluralRules>,
}

impl PluralSelector {
    /// Rules for `locale`, falling back to the bare language; unsupported
    /// languages select `other` for every number.
    pub(crate) fn new(locale: &Locale, rule_type: PluralRuleType) -> Self {
        let rules = PluralRules::create(locale.langid().clone(), rule_type)
            .or_else(|_| PluralRules::create(locale.language_only().langid().clone(), rule_type))
            .map_err(|err| trace!(locale = %locale, error = err, "No plural rules for locale"))
            .ok();
        Self { rules }
    }

    pub(crate) fn select(&self, n: f64) -> &'static str {
        let category = self
            .rules
            .as_ref()
            .and_then(|rules| rules.select(n).ok())
            .unwrap_or(PluralCategory::OTHER);
        match category {
            PluralCategory::ZERO => "zero",
            PluralCategory::ONE => "one",
            PluralCategory::TWO => "two",
            PluralCategory::FEW => "few",
            PluralCategory::MANY => "many",
            PluralCategory::OTHER => "other",
        }
    }
}

impl fmt::Debug for PluralSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralSelector")
            .field("supported", &self.rules.is_some())
            .finish()
    }
}
