//! Decimal number formatting.
//!
//! Rounding works on the shortest round-trip decimal form of the `f64`, so
//! `1.005` rounds to `1.01` at two fraction digits. Ties round away from zero.

use super::conventions::Conventions;
use polyglot_config::NumberFormat;

const MAX_SIGNIFICANT: usize = 21;

/// Resolved digit options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Digits {
    pub min_integer: usize,
    pub min_fraction: usize,
    pub max_fraction: usize,
    pub significant: Option<(usize, usize)>,
    pub grouping: bool,
}

impl Digits {
    /// Resolve `config` against the formatter's default fraction range.
    pub(crate) fn resolve(
        config: Option<&NumberFormat>,
        default_min_fraction: usize,
        default_max_fraction: usize,
    ) -> Self {
        let get = |f: fn(&NumberFormat) -> Option<u8>| config.and_then(f).map(usize::from);

        let (min_fraction, max_fraction) = match (
            get(|c| c.minimum_fraction_digits),
            get(|c| c.maximum_fraction_digits),
        ) {
            (Some(min), Some(max)) => (min, max.max(min)),
            (Some(min), None) => (min, default_max_fraction.max(min)),
            (None, Some(max)) => (default_min_fraction.min(max), max),
            (None, None) => (default_min_fraction, default_max_fraction),
        };

        let significant = match (
            get(|c| c.minimum_significant_digits),
            get(|c| c.maximum_significant_digits),
        ) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(1).clamp(1, MAX_SIGNIFICANT);
                let max = max.unwrap_or(MAX_SIGNIFICANT).clamp(min, MAX_SIGNIFICANT);
                Some((min, max))
            }
        };

        Self {
            min_integer: get(|c| c.minimum_integer_digits).unwrap_or(1).max(1),
            min_fraction,
            max_fraction,
            significant,
            grouping: config.and_then(|c| c.use_grouping).unwrap_or(true),
        }
    }
}

/// `0.d1d2d3… × 10^exponent`, trailing zeros stripped; zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: Vec<u8>,
    exponent: i32,
}

impl Decimal {
    fn from_f64(value: f64) -> Self {
        let value = value.abs();
        if value == 0.0 {
            return Self {
                digits: Vec::new(),
                exponent: 0,
            };
        }

        let repr = format!("{value:e}");
        let (mantissa, exponent) = repr.split_once('e').unwrap_or((&repr, "0"));
        let digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        let mut decimal = Self {
            digits,
            exponent: exponent.parse::<i32>().unwrap_or(0) + 1,
        };
        decimal.trim();
        decimal
    }

    fn trim(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.exponent = 0;
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Keep `keep` leading digits, rounding half away from zero.
    fn round_to(&mut self, keep: i32) {
        let len = i32::try_from(self.digits.len()).unwrap_or(i32::MAX);
        if keep >= len {
            return;
        }
        if keep < 0 {
            self.digits.clear();
            self.exponent = 0;
            return;
        }

        let cut = usize::try_from(keep).unwrap_or(0);
        let round_up = self.digits[cut] >= 5;
        self.digits.truncate(cut);
        if round_up {
            loop {
                match self.digits.last_mut() {
                    Some(9) => {
                        self.digits.pop();
                    }
                    Some(digit) => {
                        *digit += 1;
                        break;
                    }
                    None => {
                        self.digits.push(1);
                        self.exponent += 1;
                        break;
                    }
                }
            }
        }
        self.trim();
    }

    fn round_fraction(&mut self, max_fraction: usize) {
        let max_fraction = i32::try_from(max_fraction).unwrap_or(i32::MAX);
        self.round_to(self.exponent.saturating_add(max_fraction));
    }

    fn round_significant(&mut self, max_significant: usize) {
        self.round_to(i32::try_from(max_significant).unwrap_or(i32::MAX));
    }

    fn integer_part(&self) -> String {
        if self.exponent <= 0 {
            return "0".to_string();
        }
        let int_len = usize::try_from(self.exponent).unwrap_or(0);
        (0..int_len)
            .map(|i| char::from(b'0' + self.digits.get(i).copied().unwrap_or(0)))
            .collect()
    }

    fn fraction_part(&self) -> String {
        let leading_zeros = usize::try_from(-self.exponent).unwrap_or(0);
        let skip = usize::try_from(self.exponent).unwrap_or(0);
        std::iter::repeat('0')
            .take(leading_zeros)
            .chain(self.digits.iter().skip(skip).map(|d| char::from(b'0' + d)))
            .collect()
    }
}

fn group_integer(integer: &str, conventions: &Conventions) -> String {
    let len = integer.len();
    if len <= 3 || len < 3 + conventions.min_grouping {
        return integer.to_string();
    }

    let mut out = String::with_capacity(len + len / 3 * conventions.group.len());
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(conventions.group);
        }
        out.push(ch);
    }
    out
}

/// A rounded magnitude, ready for sign and affixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rounded {
    pub text: String,
    pub is_zero: bool,
    pub is_one: bool,
}

/// Format the magnitude of `value`; the sign is left to the caller.
pub(crate) fn format_magnitude(value: f64, digits: &Digits, conventions: &Conventions) -> Rounded {
    if value.is_nan() {
        return Rounded {
            text: "NaN".to_string(),
            is_zero: false,
            is_one: false,
        };
    }
    if value.is_infinite() {
        return Rounded {
            text: "∞".to_string(),
            is_zero: false,
            is_one: false,
        };
    }

    let mut decimal = Decimal::from_f64(value);
    let mut fraction_len = match digits.significant {
        Some((min, max)) => {
            decimal.round_significant(max);
            let exponent = if decimal.is_zero() { 1 } else { decimal.exponent };
            let needed = i32::try_from(min).unwrap_or(0) - exponent;
            usize::try_from(needed).unwrap_or(0)
        }
        None => {
            decimal.round_fraction(digits.max_fraction);
            digits.min_fraction
        }
    };

    let integer = decimal.integer_part();
    let integer = if integer.len() < digits.min_integer {
        format!("{integer:0>width$}", width = digits.min_integer)
    } else {
        integer
    };
    let integer = if digits.grouping {
        group_integer(&integer, conventions)
    } else {
        integer
    };

    let mut fraction = decimal.fraction_part();
    fraction_len = fraction_len.max(fraction.len());
    while fraction.len() < fraction_len {
        fraction.push('0');
    }

    let is_one = decimal.digits == [1] && decimal.exponent == 1;
    let text = if fraction.is_empty() {
        integer
    } else {
        format!("{integer}{}{fraction}", conventions.decimal)
    };

    Rounded {
        text,
        is_zero: decimal.is_zero(),
        is_one,
    }
}

/// Format `value` with a leading minus sign when it is negative and does not
/// round to zero.
///
/// A negative value that rounds to zero prints unsigned (`-0.0004` gives `0`),
/// where ICU-style formatting keeps the sign (`-0`). The money formatter
/// follows the same rule, so `-0.001` in pt-BR BRL gives `R$ 0,00`.
pub(crate) fn format_number(value: f64, digits: &Digits, conventions: &Conventions) -> String {
    let rounded = format_magnitude(value, digits, conventions);
    if value.is_sign_negative() && !rounded.is_zero && !value.is_nan() {
        format!("-{}", rounded.text)
    } else {
        rounded.text
    }
}

/// `value × 100` followed by the locale's percent sign.
pub(crate) fn format_percent(value: f64, digits: &Digits, conventions: &Conventions) -> String {
    let number = format_number(value * 100.0, digits, conventions);
    if conventions.percent_spaced {
        format!("{number} %")
    } else {
        format!("{number}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intl::conventions::EN_US;
    use crate::locale::Locale;

    fn digits(min: usize, max: usize) -> Digits {
        Digits {
            min_integer: 1,
            min_fraction: min,
            max_fraction: max,
            significant: None,
            grouping: true,
        }
    }

    fn en(value: f64, digits: &Digits) -> String {
        format_number(value, digits, &EN_US)
    }

    #[test]
    fn test_default_number_rounding() {
        let d = digits(0, 3);
        assert_eq!(en(100_000.0, &d), "100,000");
        assert_eq!(en(1234.5678, &d), "1,234.568");
        assert_eq!(en(1.005, &digits(0, 2)), "1.01");
        assert_eq!(en(0.5, &digits(0, 0)), "1");
        assert_eq!(en(9.9999, &digits(0, 2)), "10");
        assert_eq!(en(999.9996, &d), "1,000");
        assert_eq!(en(0.0004, &d), "0");
        assert_eq!(en(-0.0004, &d), "0");
        assert_eq!(en(-42.0, &d), "-42");
    }

    #[test]
    fn test_minimum_digits() {
        assert_eq!(en(5.0, &digits(2, 2)), "5.00");
        assert_eq!(en(0.05, &digits(0, 3)), "0.05");
        let padded = Digits {
            min_integer: 3,
            ..digits(0, 0)
        };
        assert_eq!(en(7.0, &padded), "007");
    }

    #[test]
    fn test_significant_digits() {
        let sig = Digits {
            significant: Some((3, 3)),
            ..digits(0, 3)
        };
        assert_eq!(en(5.0, &sig), "5.00");
        assert_eq!(en(0.5, &sig), "0.500");
        assert_eq!(en(123_456.0, &sig), "123,000");
        assert_eq!(en(0.012_345, &sig), "0.0123");
    }

    #[test]
    fn test_grouping_rules() {
        let pt_pt = crate::intl::conventions::conventions(&Locale::parse("pt-PT").unwrap());
        let d = digits(0, 3);
        assert_eq!(format_number(1234.0, &d, pt_pt), "1234");
        assert_eq!(format_number(12345.0, &d, pt_pt), "12\u{a0}345");

        let ungrouped = Digits {
            grouping: false,
            ..d
        };
        assert_eq!(en(1_234_567.0, &ungrouped), "1234567");
    }

    #[test]
    fn test_percent() {
        let de = crate::intl::conventions::conventions(&Locale::parse("de").unwrap());
        assert_eq!(format_percent(0.256, &digits(0, 0), &EN_US), "26%");
        assert_eq!(format_percent(0.5, &digits(0, 0), de), "50 %");
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = Digits::resolve(None, 0, 3);
        assert_eq!(resolved, digits(0, 3));

        let config = NumberFormat {
            minimum_fraction_digits: Some(4),
            ..NumberFormat::default()
        };
        let resolved = Digits::resolve(Some(&config), 0, 3);
        assert_eq!((resolved.min_fraction, resolved.max_fraction), (4, 4));

        let config = NumberFormat {
            maximum_fraction_digits: Some(1),
            ..NumberFormat::default()
        };
        let resolved = Digits::resolve(Some(&config), 2, 2);
        assert_eq!((resolved.min_fraction, resolved.max_fraction), (1, 1));

        let config = NumberFormat {
            maximum_significant_digits: Some(2),
            use_grouping: Some(false),
            ..NumberFormat::default()
        };
        let resolved = Digits::resolve(Some(&config), 0, 3);
        assert_eq!(resolved.significant, Some((1, 2)));
        assert!(!resolved.grouping);
    }

    #[test]
    fn test_non_finite() {
        let d = digits(0, 3);
        assert_eq!(en(f64::NAN, &d), "NaN");
        assert_eq!(en(f64::NEG_INFINITY, &d), "-∞");
    }
}
