//! Locale-formatting configuration with field-level layering.
//!
//! Knob names follow the familiar `Intl` option names (`minimumFractionDigits`,
//! `timeZone`, `hour12`, ...) so configuration files read the same way the
//! options are usually documented.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::loader::ConfigError;

/// Numeric or two-digit rendering of a calendar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericStyle {
    /// Minimal digits (`1`)
    Numeric,
    /// Always two digits (`01`)
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// Rendering of the month field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStyle {
    /// Minimal digits (`1`)
    Numeric,
    /// Always two digits (`01`)
    #[serde(rename = "2-digit")]
    TwoDigit,
    /// Full name (`January`)
    Long,
    /// Abbreviated name (`Jan`)
    Short,
    /// Single letter (`J`)
    Narrow,
}

/// Width of a textual field such as the weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Full name
    Long,
    /// Abbreviated name
    Short,
    /// Single letter
    Narrow,
}

/// How negative currency amounts are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencySign {
    /// Leading minus sign
    Standard,
    /// Parentheses where the locale uses them
    Accounting,
}

/// How the currency itself is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyDisplay {
    /// ISO 4217 code (`USD`)
    #[serde(rename = "code")]
    Code,
    /// Localized symbol (`US$`)
    #[serde(rename = "symbol")]
    Symbol,
    /// Narrow symbol (`$`)
    #[serde(rename = "narrowSymbol")]
    NarrowSymbol,
    /// Spelled-out name (`US dollars`)
    #[serde(rename = "name")]
    Name,
}

/// Width of a measurement unit label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitDisplay {
    /// `32 °C`
    Short,
    /// `32 degrees Celsius`
    Long,
    /// `32°C`
    Narrow,
}

/// Layering of configuration values: `other` wins wherever it sets a value.
pub trait Merge {
    /// Overlay `other` on top of `self`.
    fn merge(&mut self, other: &Self);
}

macro_rules! merge_fields {
    ($target:expr, $other:expr; $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $target.$field = $other.$field.clone();
            }
        )+
    };
}

fn merge_section<T: Merge + Clone>(target: &mut Option<T>, other: &Option<T>) {
    match (target.as_mut(), other) {
        (Some(current), Some(over)) => current.merge(over),
        (None, Some(over)) => *target = Some(over.clone()),
        _ => {}
    }
}

/// Calendar and clock fields for date/time formatters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFormat {
    /// Weekday name
    pub weekday: Option<TextStyle>,
    /// Year
    pub year: Option<NumericStyle>,
    /// Month
    pub month: Option<MonthStyle>,
    /// Day of month
    pub day: Option<NumericStyle>,
    /// Hour
    pub hour: Option<NumericStyle>,
    /// Minute
    pub minute: Option<NumericStyle>,
    /// Second
    pub second: Option<NumericStyle>,
    /// Force a 12-hour (`true`) or 24-hour (`false`) clock
    pub hour12: Option<bool>,
    /// IANA time zone applied to absolute instants (`America/Sao_Paulo`)
    pub time_zone: Option<String>,
}

impl DateFormat {
    /// Whether any calendar or clock field is requested.
    pub fn has_fields(&self) -> bool {
        self.weekday.is_some()
            || self.year.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.hour.is_some()
            || self.minute.is_some()
            || self.second.is_some()
    }
}

impl Merge for DateFormat {
    fn merge(&mut self, other: &Self) {
        merge_fields!(self, other; weekday, year, month, day, hour, minute, second, hour12, time_zone);
    }
}

/// Digit and grouping knobs shared by every numeric formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    /// Minimum integer digits, zero padded
    #[validate(range(min = 1, max = 21))]
    pub minimum_integer_digits: Option<u8>,
    /// Minimum fraction digits
    #[validate(range(max = 20))]
    pub minimum_fraction_digits: Option<u8>,
    /// Maximum fraction digits
    #[validate(range(max = 20))]
    pub maximum_fraction_digits: Option<u8>,
    /// Minimum significant digits
    #[validate(range(min = 1, max = 21))]
    pub minimum_significant_digits: Option<u8>,
    /// Maximum significant digits
    #[validate(range(min = 1, max = 21))]
    pub maximum_significant_digits: Option<u8>,
    /// Whether to print grouping separators
    pub use_grouping: Option<bool>,
    /// Currency code used by the `money` formatter
    pub currency: Option<String>,
    /// Negative currency rendering used by the `money` formatter
    pub currency_sign: Option<CurrencySign>,
}

impl Merge for NumberFormat {
    fn merge(&mut self, other: &Self) {
        merge_fields!(
            self, other;
            minimum_integer_digits,
            minimum_fraction_digits,
            maximum_fraction_digits,
            minimum_significant_digits,
            maximum_significant_digits,
            use_grouping,
            currency,
            currency_sign,
        );
    }
}

/// Options of the `unit` formatter and of every dynamically resolved unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UnitFormat {
    /// Digit knobs
    #[serde(flatten)]
    #[validate]
    pub number: NumberFormat,
    /// Unit used by the named `unit` formatter (`kilometer-per-hour`)
    #[serde(rename = "type")]
    pub unit: Option<String>,
    /// Label width
    pub display: Option<UnitDisplay>,
}

impl Merge for UnitFormat {
    fn merge(&mut self, other: &Self) {
        self.number.merge(&other.number);
        merge_fields!(self, other; unit, display);
    }
}

/// Currency selection for the `money` formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CurrencyFormat {
    /// Digit knobs
    #[serde(flatten)]
    #[validate]
    pub number: NumberFormat,
    /// ISO 4217 code, overriding the locale's currency
    pub code: Option<String>,
    /// Negative amount style
    pub sign: Option<CurrencySign>,
    /// Symbol/code/name rendering
    pub display: Option<CurrencyDisplay>,
}

impl Merge for CurrencyFormat {
    fn merge(&mut self, other: &Self) {
        self.number.merge(&other.number);
        merge_fields!(self, other; code, sign, display);
    }
}

/// Per-formatter configuration for one formatter bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PolyglotConfig {
    /// `date` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateFormat>,
    /// `time` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateFormat>,
    /// `datetime` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateFormat>,
    /// `number` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub number: Option<NumberFormat>,
    /// `percent` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub percent: Option<NumberFormat>,
    /// `money` formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub money: Option<NumberFormat>,
    /// `unit` formatter and dynamic unit formatters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub unit: Option<UnitFormat>,
    /// Currency selection for `money`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub currency: Option<CurrencyFormat>,
}

impl Merge for PolyglotConfig {
    fn merge(&mut self, other: &Self) {
        merge_section(&mut self.date, &other.date);
        merge_section(&mut self.time, &other.time);
        merge_section(&mut self.datetime, &other.datetime);
        merge_section(&mut self.number, &other.number);
        merge_section(&mut self.percent, &other.percent);
        merge_section(&mut self.money, &other.money);
        merge_section(&mut self.unit, &other.unit);
        merge_section(&mut self.currency, &other.currency);
    }
}

impl PolyglotConfig {
    /// Return `self` with `other` layered on top.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Explicit currency code, if configuration names one.
    ///
    /// `currency.code` wins over `money.currency`.
    pub fn currency_code(&self) -> Option<&str> {
        self.currency
            .as_ref()
            .and_then(|c| c.code.as_deref())
            .or_else(|| self.money.as_ref().and_then(|m| m.currency.as_deref()))
    }
}

/// Full engine/call-site options: formatter configuration, per-locale
/// overrides and the fallback key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyglotOptions {
    /// Configuration applied to every locale
    #[serde(flatten)]
    pub base: PolyglotConfig,
    /// Overrides keyed by locale tag (`en-US`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub languages: HashMap<String, PolyglotConfig>,
    /// Key looked up when the requested key is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl PolyglotOptions {
    /// Options that only carry a fallback key.
    pub fn with_fallback(key: impl Into<String>) -> Self {
        Self {
            fallback: Some(key.into()),
            ..Self::default()
        }
    }

    /// Overrides registered for `tag`, compared case-insensitively.
    pub fn language(&self, tag: &str) -> Option<&PolyglotConfig> {
        self.languages
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(tag))
            .map(|(_, config)| config)
    }

    /// The configuration for `tag`: base overlaid with the locale's overrides.
    pub fn for_language(&self, tag: &str) -> PolyglotConfig {
        match self.language(tag) {
            Some(language) => self.base.merged(language),
            None => self.base.clone(),
        }
    }

    /// Effective configuration for a bundle built for `tag`:
    /// engine base < engine per-locale < call-site base < call-site per-locale.
    ///
    /// Layers merge field by field, not block by block. A per-locale `number`
    /// block that only sets `maximumFractionDigits` keeps the base's
    /// `minimumFractionDigits` and `useGrouping` instead of replacing the
    /// whole `number` block, so digit limits can differ from a shallow
    /// object spread of the same layers.
    pub fn layered(&self, tag: &str, call_site: Option<&Self>) -> PolyglotConfig {
        let mut config = self.for_language(tag);
        if let Some(call_site) = call_site {
            config.merge(&call_site.for_language(tag));
        }
        config
    }

    /// Validate the base configuration and every per-locale override.
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.base.validate()?;
        for config in self.languages.values() {
            config.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(max: u8) -> NumberFormat {
        NumberFormat {
            maximum_fraction_digits: Some(max),
            ..NumberFormat::default()
        }
    }

    #[test]
    fn test_merge_is_field_level() {
        let mut base = PolyglotConfig {
            number: Some(NumberFormat {
                minimum_fraction_digits: Some(1),
                use_grouping: Some(false),
                ..NumberFormat::default()
            }),
            ..PolyglotConfig::default()
        };
        base.merge(&PolyglotConfig {
            number: Some(digits(4)),
            ..PolyglotConfig::default()
        });

        let number = base.number.unwrap();
        assert_eq!(number.minimum_fraction_digits, Some(1));
        assert_eq!(number.maximum_fraction_digits, Some(4));
        assert_eq!(number.use_grouping, Some(false));
    }

    #[test]
    fn test_layered_precedence() {
        let mut engine = PolyglotOptions {
            base: PolyglotConfig {
                number: Some(digits(1)),
                ..PolyglotConfig::default()
            },
            ..PolyglotOptions::default()
        };
        engine.languages.insert(
            "en-US".to_string(),
            PolyglotConfig {
                number: Some(digits(2)),
                ..PolyglotConfig::default()
            },
        );

        let effective = engine.layered("en-US", None);
        assert_eq!(effective.number.unwrap().maximum_fraction_digits, Some(2));

        let effective = engine.layered("pt-BR", None);
        assert_eq!(effective.number.unwrap().maximum_fraction_digits, Some(1));

        let call_site = PolyglotOptions {
            base: PolyglotConfig {
                number: Some(digits(3)),
                ..PolyglotConfig::default()
            },
            ..PolyglotOptions::default()
        };
        let effective = engine.layered("en-US", Some(&call_site));
        assert_eq!(effective.number.unwrap().maximum_fraction_digits, Some(3));
    }

    #[test]
    fn test_locale_block_does_not_replace_base_block() {
        let mut options = PolyglotOptions {
            base: PolyglotConfig {
                number: Some(NumberFormat {
                    minimum_fraction_digits: Some(2),
                    use_grouping: Some(false),
                    ..NumberFormat::default()
                }),
                ..PolyglotConfig::default()
            },
            ..PolyglotOptions::default()
        };
        options.languages.insert(
            "en-US".to_string(),
            PolyglotConfig {
                number: Some(digits(3)),
                ..PolyglotConfig::default()
            },
        );

        let number = options.layered("en-US", None).number.unwrap();
        assert_eq!(number.minimum_fraction_digits, Some(2));
        assert_eq!(number.maximum_fraction_digits, Some(3));
        assert_eq!(number.use_grouping, Some(false));
    }

    #[test]
    fn test_language_lookup_ignores_case() {
        let mut options = PolyglotOptions::default();
        options
            .languages
            .insert("en-us".to_string(), PolyglotConfig::default());
        assert!(options.language("en-US").is_some());
        assert!(options.language("pt-BR").is_none());
    }

    #[test]
    fn test_currency_code_precedence() {
        let config = PolyglotConfig {
            money: Some(NumberFormat {
                currency: Some("USD".to_string()),
                ..NumberFormat::default()
            }),
            currency: Some(CurrencyFormat {
                code: Some("EUR".to_string()),
                ..CurrencyFormat::default()
            }),
            ..PolyglotConfig::default()
        };
        assert_eq!(config.currency_code(), Some("EUR"));
        assert_eq!(PolyglotConfig::default().currency_code(), None);
    }

    #[test]
    fn test_deserialize_intl_names() {
        let json = r#"{
            "time": { "hour": "2-digit", "minute": "2-digit", "hour12": false, "timeZone": "UTC" },
            "unit": { "type": "celsius", "display": "long", "maximumFractionDigits": 1 },
            "currency": { "code": "BRL", "display": "narrowSymbol", "sign": "accounting" },
            "languages": { "en-US": { "number": { "useGrouping": false } } },
            "fallback": "welcome"
        }"#;
        let options: PolyglotOptions = serde_json::from_str(json).unwrap();

        let time = options.base.time.as_ref().unwrap();
        assert_eq!(time.hour, Some(NumericStyle::TwoDigit));
        assert_eq!(time.hour12, Some(false));
        assert_eq!(time.time_zone.as_deref(), Some("UTC"));

        let unit = options.base.unit.as_ref().unwrap();
        assert_eq!(unit.unit.as_deref(), Some("celsius"));
        assert_eq!(unit.display, Some(UnitDisplay::Long));
        assert_eq!(unit.number.maximum_fraction_digits, Some(1));

        let currency = options.base.currency.as_ref().unwrap();
        assert_eq!(currency.display, Some(CurrencyDisplay::NarrowSymbol));
        assert_eq!(currency.sign, Some(CurrencySign::Accounting));

        assert_eq!(options.fallback.as_deref(), Some("welcome"));
        assert_eq!(
            options.language("en-US").unwrap().number.as_ref().unwrap().use_grouping,
            Some(false)
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range_digits() {
        let options = PolyglotOptions {
            base: PolyglotConfig {
                number: Some(digits(40)),
                ..PolyglotConfig::default()
            },
            ..PolyglotOptions::default()
        };
        assert!(options.validate_all().is_err());

        let mut options = PolyglotOptions::default();
        options.languages.insert(
            "en-US".to_string(),
            PolyglotConfig {
                percent: Some(NumberFormat {
                    minimum_significant_digits: Some(0),
                    ..NumberFormat::default()
                }),
                ..PolyglotConfig::default()
            },
        );
        assert!(options.validate_all().is_err());
        assert!(PolyglotOptions::default().validate_all().is_ok());
    }
}
