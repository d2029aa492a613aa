//! American English

use polyglot_config::PolyglotOptions;
use polyglot_i18n::{FormatterBundle, Params, TranslationMap};

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius.mul_add(9.0 / 5.0, 32.0)
}

/// Build the en-US map. Temperatures arrive in Celsius and are shown in
/// Fahrenheit.
pub fn build(f: &FormatterBundle) -> TranslationMap {
    let formatters = f.clone();
    TranslationMap::new()
        .with_text("welcome", "Hello world")
        .with_fn("hello", |params: &Params, _: Option<&PolyglotOptions>| {
            format!("Hello {}", params.text("fulano"))
        })
        .with_fn(
            "temperature",
            move |params: &Params, _: Option<&PolyglotOptions>| {
                let temperature = params
                    .number("temp")
                    .and_then(|c| formatters.unit("fahrenheit", celsius_to_fahrenheit(c)))
                    .unwrap_or_else(|| params.text("temp"));
                format!("Temperature {temperature}. Just a {{{{teste}}}}")
            },
        )
        .with_text("today", "Today is {{day|date}}")
        .with_text("time", "It is {{time|time}}")
        .with_text("visitors", format!("{} visitors a day", f.number(100_000.0)))
}
