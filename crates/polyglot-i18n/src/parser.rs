//! Template parsing.
//!
//! Rewrites `{{name}}` and `{{name|f1|f2}}` tokens using the supplied
//! parameters and a [`FormatterBundle`].

use crate::formatters::FormatterBundle;
use crate::value::{Params, Value};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("token pattern is valid"));

/// Render `text`.
///
/// Tokens naming an unknown parameter are left verbatim. Formatter names that
/// cannot be resolved are skipped. The result is NFC-normalized.
pub fn parse(text: &str, params: &Params, formatters: &FormatterBundle) -> String {
    let rendered = TOKEN.replace_all(text, |caps: &Captures<'_>| {
        let mut segments = caps[1].split('|').map(str::trim);
        let name = segments.next().unwrap_or_default();
        match params.get(name) {
            Some(value) => render(value, segments, formatters),
            None => caps[0].to_string(),
        }
    });
    rendered.nfc().collect()
}

fn render<'a>(
    value: &Value,
    pipeline: impl Iterator<Item = &'a str>,
    formatters: &FormatterBundle,
) -> String {
    pipeline
        .fold(value.clone(), |value, name| match formatters.resolve(name) {
            Some(formatter) => formatters.apply(&formatter, &value),
            None => value,
        })
        .to_string()
}
