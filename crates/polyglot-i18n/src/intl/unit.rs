//! Measurement units.
//!
//! Simple units follow the sanctioned identifiers (`celsius`, `kilometer`,
//! `megabyte`, ...); compound units are written `X-per-Y`. Long names are
//! English only, other languages fall back to the short form.

use super::conventions::Conventions;
use super::number::{format_number, Digits};
use polyglot_config::UnitDisplay;

struct SimpleUnit {
    id: &'static str,
    short: &'static str,
    narrow: &'static str,
    one: &'static str,
    other: &'static str,
    /// Written without a space in English (`32°C`)
    tight: bool,
}

const fn unit(
    id: &'static str,
    short: &'static str,
    narrow: &'static str,
    one: &'static str,
    other: &'static str,
) -> SimpleUnit {
    SimpleUnit {
        id,
        short,
        narrow,
        one,
        other,
        tight: false,
    }
}

const fn tight(mut simple: SimpleUnit) -> SimpleUnit {
    simple.tight = true;
    simple
}

const UNITS: &[SimpleUnit] = &[
    unit("acre", "ac", "ac", "acre", "acres"),
    unit("bit", "bit", "bit", "bit", "bits"),
    unit("byte", "byte", "B", "byte", "bytes"),
    tight(unit("celsius", "°C", "°C", "degree Celsius", "degrees Celsius")),
    unit("centimeter", "cm", "cm", "centimeter", "centimeters"),
    unit("day", "day", "d", "day", "days"),
    tight(unit("degree", "deg", "°", "degree", "degrees")),
    tight(unit("fahrenheit", "°F", "°", "degree Fahrenheit", "degrees Fahrenheit")),
    unit("fluid-ounce", "fl oz", "fl oz", "fluid ounce", "fluid ounces"),
    unit("foot", "ft", "′", "foot", "feet"),
    unit("gallon", "gal", "gal", "gallon", "gallons"),
    unit("gigabit", "Gb", "Gb", "gigabit", "gigabits"),
    unit("gigabyte", "GB", "GB", "gigabyte", "gigabytes"),
    unit("gram", "g", "g", "gram", "grams"),
    unit("hectare", "ha", "ha", "hectare", "hectares"),
    unit("hour", "hr", "h", "hour", "hours"),
    unit("inch", "in", "″", "inch", "inches"),
    unit("kilobit", "kb", "kb", "kilobit", "kilobits"),
    unit("kilobyte", "kB", "kB", "kilobyte", "kilobytes"),
    unit("kilogram", "kg", "kg", "kilogram", "kilograms"),
    unit("kilometer", "km", "km", "kilometer", "kilometers"),
    unit("liter", "L", "L", "liter", "liters"),
    unit("megabit", "Mb", "Mb", "megabit", "megabits"),
    unit("megabyte", "MB", "MB", "megabyte", "megabytes"),
    unit("meter", "m", "m", "meter", "meters"),
    unit("microsecond", "μs", "μs", "microsecond", "microseconds"),
    unit("mile", "mi", "mi", "mile", "miles"),
    unit("mile-scandinavian", "smi", "smi", "mile-scandinavian", "miles-scandinavian"),
    unit("milliliter", "mL", "mL", "milliliter", "milliliters"),
    unit("millimeter", "mm", "mm", "millimeter", "millimeters"),
    unit("millisecond", "ms", "ms", "millisecond", "milliseconds"),
    unit("minute", "min", "m", "minute", "minutes"),
    unit("month", "mth", "m", "month", "months"),
    unit("nanosecond", "ns", "ns", "nanosecond", "nanoseconds"),
    unit("ounce", "oz", "oz", "ounce", "ounces"),
    tight(unit("percent", "%", "%", "percent", "percent")),
    unit("petabyte", "PB", "PB", "petabyte", "petabytes"),
    unit("pound", "lb", "#", "pound", "pounds"),
    unit("second", "sec", "s", "second", "seconds"),
    unit("stone", "st", "st", "stone", "stones"),
    unit("terabit", "Tb", "Tb", "terabit", "terabits"),
    unit("terabyte", "TB", "TB", "terabyte", "terabytes"),
    unit("week", "wk", "w", "week", "weeks"),
    unit("yard", "yd", "yd", "yard", "yards"),
    unit("year", "yr", "y", "year", "years"),
];

const COMPOUND_SHORT: &[(&str, &str)] = &[
    ("kilometer-per-hour", "km/h"),
    ("meter-per-second", "m/s"),
    ("mile-per-gallon", "mpg"),
    ("mile-per-hour", "mph"),
];

fn simple(id: &str) -> Option<&'static SimpleUnit> {
    UNITS.iter().find(|u| u.id == id)
}

/// Labels of a resolved unit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UnitLabels {
    short: String,
    narrow: String,
    one: String,
    other: String,
    tight: bool,
}

impl UnitLabels {
    fn lookup(id: &str) -> Option<Self> {
        if let Some(u) = simple(id) {
            return Some(Self {
                short: u.short.to_string(),
                narrow: u.narrow.to_string(),
                one: u.one.to_string(),
                other: u.other.to_string(),
                tight: u.tight,
            });
        }

        let (numerator, denominator) = id.split_once("-per-")?;
        let (numerator, denominator) = (simple(numerator)?, simple(denominator)?);
        let short = COMPOUND_SHORT
            .iter()
            .find(|(compound, _)| *compound == id)
            .map_or_else(|| format!("{}/{}", numerator.short, denominator.short), |(_, s)| (*s).to_string());
        Some(Self {
            narrow: short.clone(),
            short,
            one: format!("{} per {}", numerator.one, denominator.one),
            other: format!("{} per {}", numerator.other, denominator.one),
            tight: false,
        })
    }
}

/// A formatter for one measurement unit.
#[derive(Debug, Clone)]
pub struct UnitFormatter {
    unit: String,
    labels: UnitLabels,
    display: UnitDisplay,
    digits: Digits,
    conventions: &'static Conventions,
}

impl UnitFormatter {
    /// `None` when `unit` is not a known unit identifier.
    pub(crate) fn new(
        unit: &str,
        display: UnitDisplay,
        digits: Digits,
        conventions: &'static Conventions,
    ) -> Option<Self> {
        let unit = unit.trim();
        Some(Self {
            labels: UnitLabels::lookup(unit)?,
            unit: unit.to_string(),
            display,
            digits,
            conventions,
        })
    }

    /// Unit identifier (`celsius`)
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Format `value` with the unit label
    pub fn format(&self, value: f64) -> String {
        let number = format_number(value, &self.digits, self.conventions);
        match self.display {
            UnitDisplay::Narrow => format!("{number}{}", self.labels.narrow),
            UnitDisplay::Long if self.conventions.english_names => {
                let label = if (value.abs() - 1.0).abs() < f64::EPSILON && !number.contains(self.conventions.decimal) {
                    &self.labels.one
                } else {
                    &self.labels.other
                };
                format!("{number} {label}")
            }
            UnitDisplay::Short | UnitDisplay::Long => {
                let tight = self.labels.tight
                    && (self.conventions.tight_degrees || self.unit == "percent");
                if tight {
                    format!("{number}{}", self.labels.short)
                } else {
                    format!("{number} {}", self.labels.short)
                }
            }
        }
    }
}
