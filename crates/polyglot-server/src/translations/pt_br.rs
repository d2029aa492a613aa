//! Brazilian Portuguese

use polyglot_config::PolyglotOptions;
use polyglot_i18n::{FormatterBundle, Params, TranslationMap};

/// Build the pt-BR map
pub fn build(f: &FormatterBundle) -> TranslationMap {
    TranslationMap::new()
        .with_text("welcome", "Olá mundo")
        .with_fn("hello", |params: &Params, _: Option<&PolyglotOptions>| {
            format!("Olá {}", params.text("fulano"))
        })
        .with_text(
            "temperature",
            "Temperatura {{temp|celsius}}. Apenas um {{teste}}",
        )
        .with_text("today", "Hoje é dia {{day|date}}")
        .with_text("time", "São {{time|time}} horas")
        .with_text("visitors", format!("{} visitantes por dia", f.number(100_000.0)))
}
