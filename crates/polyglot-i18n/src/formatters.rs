//! Formatter bundles.
//!
//! A [`FormatterBundle`] is built once per locale and configuration and hands
//! out the fixed formatters (`date`, `time`, `datetime`, `number`, `percent`,
//! `money`, `unit`, `and`, `or`, `listUnit`, `cardinalPlural`,
//! `ordinalPlural`). Any other name is treated as a measurement unit: the
//! formatter is built on first request and memoized, including failures.

use crate::intl::conventions::{conventions, Conventions};
use crate::intl::currency::{currency_for_locale, CurrencyFormatter};
use crate::intl::datetime::DateTimeFormatter;
use crate::intl::list::{format_list, ListKind};
use crate::intl::number::{format_number, format_percent, Digits};
use crate::intl::plural::PluralSelector;
use crate::intl::{Collator, UnitFormatter};
use crate::locale::Locale;
use crate::value::Value;
use dashmap::DashMap;
use intl_pluralrules::PluralRuleType;
use polyglot_config::{
    CurrencyDisplay, CurrencySign, DateFormat, Merge, MonthStyle, NumericStyle, PolyglotConfig,
    UnitDisplay,
};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A formatter resolved by name.
#[derive(Debug, Clone)]
pub enum Formatter {
    /// `date`
    Date,
    /// `time`
    Time,
    /// `datetime`
    DateTime,
    /// `number`
    Number,
    /// `percent`
    Percent,
    /// `money`
    Money,
    /// `and`
    And,
    /// `or`
    Or,
    /// `listUnit`
    ListUnit,
    /// `cardinalPlural`
    CardinalPlural,
    /// `ordinalPlural`
    OrdinalPlural,
    /// `unit` or a measurement unit name
    Unit(Arc<UnitFormatter>),
}

fn numeric_date() -> DateFormat {
    DateFormat {
        year: Some(NumericStyle::Numeric),
        month: Some(MonthStyle::Numeric),
        day: Some(NumericStyle::Numeric),
        ..DateFormat::default()
    }
}

fn date_fields(config: Option<&DateFormat>) -> DateFormat {
    match config {
        Some(config) if config.has_fields() => config.clone(),
        Some(config) => DateFormat {
            hour12: config.hour12,
            time_zone: config.time_zone.clone(),
            ..numeric_date()
        },
        None => numeric_date(),
    }
}

fn overlay(mut defaults: DateFormat, config: Option<&DateFormat>) -> DateFormat {
    if let Some(config) = config {
        defaults.merge(config);
    }
    defaults
}

fn time_fields(config: Option<&DateFormat>) -> DateFormat {
    let defaults = DateFormat {
        hour: Some(NumericStyle::Numeric),
        minute: Some(NumericStyle::Numeric),
        ..DateFormat::default()
    };
    overlay(defaults, config)
}

fn datetime_fields(config: Option<&DateFormat>) -> DateFormat {
    let defaults = DateFormat {
        hour: Some(NumericStyle::Numeric),
        minute: Some(NumericStyle::Numeric),
        ..numeric_date()
    };
    overlay(defaults, config)
}

fn list_items(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::List(items) => Some(items.iter().map(ToString::to_string).collect()),
        _ => None,
    }
}

struct Inner {
    locale: Locale,
    config: PolyglotConfig,
    conventions: &'static Conventions,
    date: DateTimeFormatter,
    time: DateTimeFormatter,
    datetime: DateTimeFormatter,
    number: Digits,
    percent: Digits,
    money: Option<CurrencyFormatter>,
    unit_digits: Digits,
    unit_display: UnitDisplay,
    unit: Option<Arc<UnitFormatter>>,
    cardinal: PluralSelector,
    ordinal: PluralSelector,
    collator: Collator,
    units: DashMap<String, Option<Arc<UnitFormatter>>>,
}

/// The formatters of one locale. Cheap to clone.
#[derive(Clone)]
pub struct FormatterBundle {
    inner: Arc<Inner>,
}

impl FormatterBundle {
    /// Build the bundle for `locale` from an already layered configuration
    pub fn new(locale: &Locale, config: &PolyglotConfig) -> Self {
        let conventions = conventions(locale);

        let mut money_digits = config.money.clone().unwrap_or_default();
        if let Some(currency) = &config.currency {
            money_digits.merge(&currency.number);
        }
        let display = config
            .currency
            .as_ref()
            .and_then(|c| c.display)
            .unwrap_or(CurrencyDisplay::Symbol);
        let sign = config
            .currency
            .as_ref()
            .and_then(|c| c.sign)
            .or_else(|| config.money.as_ref().and_then(|m| m.currency_sign))
            .unwrap_or(CurrencySign::Standard);
        let money = config
            .currency_code()
            .or_else(|| currency_for_locale(locale))
            .and_then(|code| {
                CurrencyFormatter::new(locale, code, display, sign, Some(&money_digits), conventions)
            });

        let unit_config = config.unit.as_ref();
        let unit_digits = Digits::resolve(unit_config.map(|u| &u.number), 0, 3);
        let unit_display = unit_config
            .and_then(|u| u.display)
            .unwrap_or(UnitDisplay::Short);
        let unit = unit_config
            .and_then(|u| u.unit.as_deref())
            .and_then(|name| UnitFormatter::new(name, unit_display, unit_digits, conventions))
            .map(Arc::new);

        Self {
            inner: Arc::new(Inner {
                locale: locale.clone(),
                config: config.clone(),
                conventions,
                date: DateTimeFormatter::new(date_fields(config.date.as_ref()), conventions),
                time: DateTimeFormatter::new(time_fields(config.time.as_ref()), conventions),
                datetime: DateTimeFormatter::new(
                    datetime_fields(config.datetime.as_ref()),
                    conventions,
                ),
                number: Digits::resolve(config.number.as_ref(), 0, 3),
                percent: Digits::resolve(config.percent.as_ref(), 0, 0),
                money,
                unit_digits,
                unit_display,
                unit,
                cardinal: PluralSelector::new(locale, PluralRuleType::CARDINAL),
                ordinal: PluralSelector::new(locale, PluralRuleType::ORDINAL),
                collator: Collator::new(locale.clone()),
                units: DashMap::new(),
            }),
        }
    }

    /// Locale the bundle formats for
    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    /// Effective configuration
    pub fn config(&self) -> &PolyglotConfig {
        &self.inner.config
    }

    /// Format a date; non-date values come back as their string form
    pub fn date(&self, value: impl Into<Value>) -> String {
        let value = value.into();
        self.inner.date.format(&value).unwrap_or_else(|| value.to_string())
    }

    /// Format a time of day
    pub fn time(&self, value: impl Into<Value>) -> String {
        let value = value.into();
        self.inner.time.format(&value).unwrap_or_else(|| value.to_string())
    }

    /// Format a date with its time of day
    pub fn datetime(&self, value: impl Into<Value>) -> String {
        let value = value.into();
        self.inner
            .datetime
            .format(&value)
            .unwrap_or_else(|| value.to_string())
    }

    /// Format a plain number
    pub fn number(&self, n: f64) -> String {
        format_number(n, &self.inner.number, self.inner.conventions)
    }

    /// Format a ratio as a percentage (`0.25` → `25%`)
    pub fn percent(&self, n: f64) -> String {
        format_percent(n, &self.inner.percent, self.inner.conventions)
    }

    /// Format an amount in the resolved currency, or as a plain number when
    /// no currency could be resolved
    pub fn money(&self, n: f64) -> String {
        match &self.inner.money {
            Some(money) => money.format(n),
            None => self.number(n),
        }
    }

    /// ISO code used by `money`
    pub fn currency(&self) -> Option<&str> {
        self.inner.money.as_ref().map(CurrencyFormatter::code)
    }

    /// Format `n` in `unit`; `None` for unsupported units
    pub fn unit(&self, unit: &str, n: f64) -> Option<String> {
        self.unit_formatter(unit).map(|formatter| formatter.format(n))
    }

    /// Conjunctive list (`a, b and c`)
    pub fn and<S: AsRef<str>>(&self, items: &[S]) -> String {
        format_list(items, ListKind::Conjunction, self.inner.conventions)
    }

    /// Disjunctive list (`a, b or c`)
    pub fn or<S: AsRef<str>>(&self, items: &[S]) -> String {
        format_list(items, ListKind::Disjunction, self.inner.conventions)
    }

    /// Unit list (`5 km, 3 m`)
    pub fn list_unit<S: AsRef<str>>(&self, items: &[S]) -> String {
        format_list(items, ListKind::Unit, self.inner.conventions)
    }

    /// Cardinal plural category (`one`, `other`, ...)
    pub fn cardinal_plural(&self, n: f64) -> &'static str {
        self.inner.cardinal.select(n)
    }

    /// Ordinal plural category (`one`, `two`, `few`, `other`, ...)
    pub fn ordinal_plural(&self, n: f64) -> &'static str {
        self.inner.ordinal.select(n)
    }

    /// Collator for the bundle's locale
    pub fn collator(&self) -> &Collator {
        &self.inner.collator
    }

    /// Unit formatter for `unit`, built on first request. Unsupported units
    /// are remembered as `None`.
    pub fn unit_formatter(&self, unit: &str) -> Option<Arc<UnitFormatter>> {
        if let Some(memo) = self.inner.units.get(unit) {
            return memo.value().clone();
        }

        let inner = &self.inner;
        inner
            .units
            .entry(unit.to_string())
            .or_insert_with(|| {
                let built = UnitFormatter::new(unit, inner.unit_display, inner.unit_digits, inner.conventions)
                    .map(Arc::new);
                trace!(
                    locale = %inner.locale,
                    unit,
                    supported = built.is_some(),
                    "Memoized unit formatter"
                );
                built
            })
            .value()
            .clone()
    }

    /// Resolve a formatter by name; `None` means unsupported
    pub fn resolve(&self, name: &str) -> Option<Formatter> {
        let formatter = match name {
            "date" => Formatter::Date,
            "time" => Formatter::Time,
            "datetime" => Formatter::DateTime,
            "number" => Formatter::Number,
            "percent" => Formatter::Percent,
            "money" => {
                self.inner.money.as_ref()?;
                Formatter::Money
            }
            "unit" => Formatter::Unit(self.inner.unit.clone()?),
            "and" => Formatter::And,
            "or" => Formatter::Or,
            "listUnit" => Formatter::ListUnit,
            "cardinalPlural" => Formatter::CardinalPlural,
            "ordinalPlural" => Formatter::OrdinalPlural,
            unit => Formatter::Unit(self.unit_formatter(unit)?),
        };
        Some(formatter)
    }

    /// Run one pipeline stage. Values the formatter cannot handle pass
    /// through unchanged.
    pub fn apply(&self, formatter: &Formatter, value: &Value) -> Value {
        let inner = &self.inner;
        let formatted = match formatter {
            Formatter::Date => inner.date.format(value),
            Formatter::Time => inner.time.format(value),
            Formatter::DateTime => inner.datetime.format(value),
            Formatter::Number => value.as_f64().map(|n| self.number(n)),
            Formatter::Percent => value.as_f64().map(|n| self.percent(n)),
            Formatter::Money => value
                .as_f64()
                .and_then(|n| inner.money.as_ref().map(|money| money.format(n))),
            Formatter::Unit(unit) => value.as_f64().map(|n| unit.format(n)),
            Formatter::And => list_items(value).map(|items| self.and(&items)),
            Formatter::Or => list_items(value).map(|items| self.or(&items)),
            Formatter::ListUnit => list_items(value).map(|items| self.list_unit(&items)),
            Formatter::CardinalPlural => value
                .as_f64()
                .map(|n| self.cardinal_plural(n).to_string()),
            Formatter::OrdinalPlural => value.as_f64().map(|n| self.ordinal_plural(n).to_string()),
        };
        formatted.map_or_else(|| value.clone(), Value::Text)
    }

    #[cfg(test)]
    fn is_memoized(&self, unit: &str) -> bool {
        self.inner.units.contains_key(unit)
    }
}

impl fmt::Debug for FormatterBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterBundle")
            .field("locale", &self.inner.locale.to_string())
            .field("currency", &self.currency())
            .field("memoized_units", &self.inner.units.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polyglot_config::{CurrencyFormat, NumberFormat, UnitFormat};

    fn bundle(tag: &str) -> FormatterBundle {
        FormatterBundle::new(&Locale::parse(tag).unwrap(), &PolyglotConfig::default())
    }

    fn bundle_with(tag: &str, config: PolyglotConfig) -> FormatterBundle {
        FormatterBundle::new(&Locale::parse(tag).unwrap(), &config)
    }

    fn epoch_afternoon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_formatters_pt_br() {
        let f = bundle("pt-BR");
        assert_eq!(f.number(100_000.0), "100.000");
        assert_eq!(f.percent(0.25), "25%");
        assert_eq!(f.money(1234.5), "R$ 1.234,50");
        assert_eq!(f.currency(), Some("BRL"));
        assert_eq!(f.date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), "01/01/1970");
        assert_eq!(f.time(epoch_afternoon()), "15:00");
        assert_eq!(f.datetime(epoch_afternoon()), "01/01/1970, 15:00");
        assert_eq!(f.and(&["a", "b", "c"]), "a, b e c");
        assert_eq!(f.cardinal_plural(1.0), "one");
    }

    #[test]
    fn test_default_formatters_en_us() {
        let f = bundle("en-US");
        assert_eq!(f.number(1234.5678), "1,234.568");
        assert_eq!(f.money(-5.0), "-$5.00");
        assert_eq!(f.time(epoch_afternoon()), "3:00 PM");
        assert_eq!(f.or(&["tea", "coffee"]), "tea or coffee");
        assert_eq!(f.ordinal_plural(22.0), "two");
        assert_eq!(f.unit("fahrenheit", 89.6).as_deref(), Some("89.6°F"));
    }

    #[test]
    fn test_unit_resolution_is_memoized() {
        let f = bundle("pt-BR");
        let first = f.unit_formatter("celsius").unwrap();
        let second = f.unit_formatter("celsius").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        assert!(f.resolve("bogus").is_none());
        assert!(f.is_memoized("bogus"));
        assert!(f.resolve("bogus").is_none());
        assert!(!f.is_memoized("date"));
    }

    #[test]
    fn test_bundles_do_not_share_memo() {
        let pt = bundle("pt-BR");
        let en = bundle("en-US");
        pt.unit_formatter("celsius");
        assert!(!en.is_memoized("celsius"));
        assert_eq!(en.unit("celsius", 32.0).as_deref(), Some("32°C"));
        assert_eq!(pt.unit("celsius", 32.0).as_deref(), Some("32 °C"));
    }

    #[test]
    fn test_configured_knobs() {
        let config = PolyglotConfig {
            number: Some(NumberFormat {
                maximum_fraction_digits: Some(1),
                ..NumberFormat::default()
            }),
            percent: Some(NumberFormat {
                maximum_fraction_digits: Some(1),
                ..NumberFormat::default()
            }),
            time: Some(DateFormat {
                hour12: Some(true),
                ..DateFormat::default()
            }),
            currency: Some(CurrencyFormat {
                code: Some("USD".to_string()),
                ..CurrencyFormat::default()
            }),
            ..PolyglotConfig::default()
        };
        let f = bundle_with("pt-BR", config);
        assert_eq!(f.number(3.14159), "3,1");
        assert_eq!(f.percent(0.256), "25,6%");
        assert_eq!(f.time(epoch_afternoon()), "3:00 PM");
        assert_eq!(f.money(10.0), "US$ 10,00");
    }

    #[test]
    fn test_named_unit_formatter() {
        let f = bundle("en-US");
        assert!(f.resolve("unit").is_none());

        let config = PolyglotConfig {
            unit: Some(UnitFormat {
                unit: Some("kilometer-per-hour".to_string()),
                display: Some(UnitDisplay::Long),
                ..UnitFormat::default()
            }),
            ..PolyglotConfig::default()
        };
        let f = bundle_with("en-US", config);
        let unit = f.resolve("unit").unwrap();
        assert_eq!(
            f.apply(&unit, &Value::from(80)),
            Value::from("80 kilometers per hour")
        );
        assert_eq!(f.unit("meter", 2.0).as_deref(), Some("2 meters"));
    }

    #[test]
    fn test_money_without_currency() {
        let f = bundle("tlh");
        assert!(f.currency().is_none());
        assert!(f.resolve("money").is_none());
        assert_eq!(f.money(5.0), "5");
    }

    #[test]
    fn test_apply_passes_unhandled_values_through() {
        let f = bundle("pt-BR");
        let number = f.resolve("number").unwrap();
        assert_eq!(f.apply(&number, &Value::from("abc")), Value::from("abc"));
        assert_eq!(f.apply(&number, &Value::from("1234")), Value::from("1.234"));

        let date = f.resolve("date").unwrap();
        assert_eq!(f.apply(&date, &Value::from(true)), Value::Bool(true));

        let and = f.resolve("and").unwrap();
        assert_eq!(f.apply(&and, &Value::from(vec!["x", "y"])), Value::from("x e y"));
        assert_eq!(f.apply(&and, &Value::from("x")), Value::from("x"));
    }
}
