//! Locale-aware string comparison

use crate::locale::Locale;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares strings the way a reader sorts them: base letters first, then
/// accents, then case (lowercase before uppercase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collator {
    locale: Locale,
}

impl Collator {
    /// Create a collator for `locale`
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale this collator was built for
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Compare two strings
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        base_key(a)
            .cmp(&base_key(b))
            .then_with(|| accent_key(a).cmp(&accent_key(b)))
            .then_with(|| case_key(a).cmp(&case_key(b)))
            .then_with(|| a.cmp(b))
    }

    /// Sort `items` in place
    pub fn sort<S: AsRef<str>>(&self, items: &mut [S]) {
        items.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

fn base_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
