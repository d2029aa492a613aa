//! Built-in translation maps.
//!
//! The default locale's map is registered as the eager default; every other
//! built-in locale is registered behind a deferred loader so it is only built
//! when first requested.

pub mod en_us;
pub mod pt_br;

use polyglot_i18n::{
    FormatterBundle, I18nError, I18nResult, Locale, TranslationMap, TranslationModule,
    TranslationRegistry,
};

type Builder = fn(&FormatterBundle) -> TranslationMap;

/// Locales shipped with the server
pub const BUILTIN: &[(&str, Builder)] = &[("en-US", en_us::build), ("pt-BR", pt_br::build)];

async fn load(builder: Builder) -> I18nResult<TranslationModule> {
    Ok(TranslationModule::new(builder))
}

/// Registry with `default_locale` as the eager default and the remaining
/// built-in locales registered lazily.
pub fn registry(default_locale: &Locale) -> I18nResult<TranslationRegistry> {
    let default_tag = default_locale.to_string();
    let (_, default_builder) = BUILTIN
        .iter()
        .find(|(tag, _)| *tag == default_tag)
        .ok_or_else(|| I18nError::UnknownLanguage {
            locale: default_tag.clone(),
        })?;

    let mut registry = TranslationRegistry::new(default_locale.clone(), *default_builder);
    for (tag, builder) in BUILTIN {
        if *tag == default_tag {
            continue;
        }
        let builder = *builder;
        registry = registry.with_deferred(Locale::parse(tag)?, move || load(builder));
    }
    Ok(registry)
}
