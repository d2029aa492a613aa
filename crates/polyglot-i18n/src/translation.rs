//! Translation maps: key → literal label or translation function.

use crate::formatters::FormatterBundle;
use crate::value::Params;
use polyglot_config::PolyglotOptions;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The result of a lookup.
///
/// Text labels go through the template parser; opaque labels (markup
/// fragments, structured payloads) are handed back untouched.
#[derive(Clone)]
pub enum Label {
    /// Renderable text
    Text(String),
    /// Anything else
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Label {
    /// Wrap an arbitrary value as an opaque label
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// The text, if this is a text label
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Opaque(_) => None,
        }
    }

    /// Whether this is a text label
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Downcast an opaque label
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Opaque(value) => value.downcast_ref(),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A translation function: `(params, options) → label`
pub type TranslationFn = dyn Fn(&Params, Option<&PolyglotOptions>) -> Label + Send + Sync;

/// One entry of a translation map
#[derive(Clone)]
pub enum Translation {
    /// A literal label
    Label(Label),
    /// A function producing the label from parameters
    Function(Arc<TranslationFn>),
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Key → translation for one locale
#[derive(Clone, Default)]
pub struct TranslationMap {
    entries: HashMap<String, Translation>,
}

impl TranslationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text label
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, Translation::Label(Label::Text(text.into())));
        self
    }

    /// Add any label
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, label: Label) -> Self {
        self.insert(key, Translation::Label(label));
        self
    }

    /// Add a translation function
    #[must_use]
    pub fn with_fn<F, L>(mut self, key: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Params, Option<&PolyglotOptions>) -> L + Send + Sync + 'static,
        L: Into<Label>,
    {
        let function: Arc<TranslationFn> = Arc::new(
            move |params: &Params, options: Option<&PolyglotOptions>| -> Label {
                function(params, options).into()
            },
        );
        self.insert(key, Translation::Function(function));
        self
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, translation: Translation) {
        self.entries.insert(key.into(), translation);
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&Translation> {
        self.entries.get(key)
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Translation)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, Translation)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, translation) in iter {
            map.insert(key, translation);
        }
        map
    }
}

impl fmt::Debug for TranslationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("TranslationMap").field("keys", &keys).finish()
    }
}

/// Builds a locale's map from its formatter bundle
pub type MapBuilder = Arc<dyn Fn(&FormatterBundle) -> TranslationMap + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let map = TranslationMap::new()
            .with_text("welcome", "Olá mundo")
            .with_fn("hello", |params: &Params, _: Option<&PolyglotOptions>| {
                format!("Olá {}", params.text("name"))
            })
            .with_label("logo", Label::opaque(42_u32));

        assert_eq!(map.len(), 3);
        assert!(map.contains("hello"));
        assert!(!map.contains("missing"));
        assert!(matches!(map.get("welcome"), Some(Translation::Label(Label::Text(t))) if t == "Olá mundo"));

        let Some(Translation::Function(hello)) = map.get("hello") else {
            panic!("expected a function");
        };
        let label = hello(&Params::new().with("name", "Fulano"), None);
        assert_eq!(label.as_text(), Some("Olá Fulano"));
    }

    #[test]
    fn test_opaque_labels() {
        let label = Label::opaque(vec![1, 2, 3]);
        assert!(!label.is_text());
        assert_eq!(label.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
        assert!(label.downcast_ref::<String>().is_none());
        assert_eq!(label.clone(), label);
        assert_ne!(Label::opaque(1), Label::opaque(1));
    }

    #[test]
    fn test_debug_lists_sorted_keys() {
        let map: TranslationMap = [
            ("b", Translation::Label("x".into())),
            ("a", Translation::Label("y".into())),
        ]
        .into_iter()
        .collect();
        assert_eq!(format!("{map:?}"), r#"TranslationMap { keys: ["a", "b"] }"#);
    }
}
