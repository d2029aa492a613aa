//! Locale identifiers

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A BCP-47 locale such as `pt-BR`, canonicalized on parse (`en-us` becomes `en-US`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(LanguageIdentifier);

impl Locale {
    /// Parse a language tag
    pub fn parse(tag: &str) -> I18nResult<Self> {
        tag.trim()
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|_| I18nError::InvalidLanguageId(tag.to_string()))
    }

    /// The underlying language identifier
    pub fn langid(&self) -> &LanguageIdentifier {
        &self.0
    }

    /// Primary language subtag (`pt`)
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    /// Region subtag (`BR`), if any
    pub fn region(&self) -> Option<&str> {
        self.0.region.as_ref().map(|region| region.as_str())
    }

    /// The same locale without script, region or variants
    pub fn language_only(&self) -> Self {
        let mut langid = LanguageIdentifier::default();
        langid.language = self.0.language;
        Self(langid)
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Locale {
    type Error = I18nError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(langid: LanguageIdentifier) -> Self {
        Self(langid)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalizes_case() {
        let locale = Locale::parse("pt-br").unwrap();
        assert_eq!(locale.to_string(), "pt-BR");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));
        assert_eq!(locale, "PT-BR".parse().unwrap());
    }

    #[test]
    fn test_invalid_tag() {
        let err = Locale::parse("not a locale").unwrap_err();
        assert!(matches!(err, I18nError::InvalidLanguageId(tag) if tag == "not a locale"));
    }

    #[test]
    fn test_language_only() {
        let locale = Locale::parse("en-US").unwrap();
        assert_eq!(locale.language_only().to_string(), "en");
        assert_eq!(locale.language_only().region(), None);
    }

    #[test]
    fn test_serde_as_string() {
        let locale = Locale::parse("en-US").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"en-US\"");
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
        assert!(serde_json::from_str::<Locale>("\"!!\"").is_err());
    }
}
