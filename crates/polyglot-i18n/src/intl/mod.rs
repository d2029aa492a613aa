//! Locale-aware formatting primitives backing the formatter bundle.
//!
//! This is deliberately small: a table of conventions for the shipped
//! locales, decimal rounding, currency and unit affixes, date/time layout,
//! list joining and a three-level collator. Plural categories come from
//! `intl_pluralrules`.

pub mod collator;
pub(crate) mod conventions;
pub(crate) mod currency;
pub(crate) mod datetime;
pub(crate) mod list;
pub(crate) mod number;
pub(crate) mod plural;
pub mod unit;

pub use collator::Collator;
pub use unit::UnitFormatter;
