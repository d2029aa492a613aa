//! Locale → currency lookup and currency formatting.

use super::conventions::{Conventions, CurrencyPosition};
use super::number::{format_magnitude, Digits};
use crate::locale::Locale;
use polyglot_config::{CurrencyDisplay, CurrencySign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CurrencyInfo {
    code: &'static str,
    symbol: &'static str,
    narrow: &'static str,
    digits: usize,
    name_one: &'static str,
    name_other: &'static str,
}

const fn info(
    code: &'static str,
    symbol: &'static str,
    narrow: &'static str,
    digits: usize,
    name_one: &'static str,
    name_other: &'static str,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        symbol,
        narrow,
        digits,
        name_one,
        name_other,
    }
}

const CURRENCIES: &[CurrencyInfo] = &[
    info("ARS", "ARS", "$", 2, "Argentine peso", "Argentine pesos"),
    info("AUD", "A$", "$", 2, "Australian dollar", "Australian dollars"),
    info("BRL", "R$", "R$", 2, "Brazilian real", "Brazilian reals"),
    info("CAD", "CA$", "$", 2, "Canadian dollar", "Canadian dollars"),
    info("CHF", "CHF", "CHF", 2, "Swiss franc", "Swiss francs"),
    info("CLP", "CLP", "$", 0, "Chilean peso", "Chilean pesos"),
    info("CNY", "CN¥", "¥", 2, "Chinese yuan", "Chinese yuan"),
    info("EUR", "€", "€", 2, "euro", "euros"),
    info("GBP", "£", "£", 2, "British pound", "British pounds"),
    info("INR", "₹", "₹", 2, "Indian rupee", "Indian rupees"),
    info("JPY", "¥", "¥", 0, "Japanese yen", "Japanese yen"),
    info("KRW", "₩", "₩", 0, "South Korean won", "South Korean won"),
    info("MXN", "MX$", "$", 2, "Mexican peso", "Mexican pesos"),
    info("USD", "US$", "$", 2, "US dollar", "US dollars"),
];

const REGION_CURRENCIES: &[(&str, &str)] = &[
    ("AO", "AOA"),
    ("AR", "ARS"),
    ("AT", "EUR"),
    ("AU", "AUD"),
    ("BE", "EUR"),
    ("BR", "BRL"),
    ("CA", "CAD"),
    ("CH", "CHF"),
    ("CL", "CLP"),
    ("CN", "CNY"),
    ("CO", "COP"),
    ("DE", "EUR"),
    ("DK", "DKK"),
    ("ES", "EUR"),
    ("FI", "EUR"),
    ("FR", "EUR"),
    ("GB", "GBP"),
    ("GR", "EUR"),
    ("IE", "EUR"),
    ("IN", "INR"),
    ("IT", "EUR"),
    ("JP", "JPY"),
    ("KR", "KRW"),
    ("MX", "MXN"),
    ("MZ", "MZN"),
    ("NL", "EUR"),
    ("NO", "NOK"),
    ("NZ", "NZD"),
    ("PE", "PEN"),
    ("PL", "PLN"),
    ("PT", "EUR"),
    ("SE", "SEK"),
    ("US", "USD"),
    ("UY", "UYU"),
    ("ZA", "ZAR"),
];

const LIKELY_REGIONS: &[(&str, &str)] = &[
    ("de", "DE"),
    ("en", "US"),
    ("es", "ES"),
    ("fr", "FR"),
    ("it", "IT"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("nl", "NL"),
    ("pl", "PL"),
    ("pt", "BR"),
    ("sv", "SE"),
    ("zh", "CN"),
];

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|i| table[i].1)
}

/// The currency used in `locale`'s region, inferring the region from the
/// language when the tag has none.
pub(crate) fn currency_for_locale(locale: &Locale) -> Option<&'static str> {
    let region = match locale.region() {
        Some(region) => region,
        None => lookup(LIKELY_REGIONS, locale.language())?,
    };
    lookup(REGION_CURRENCIES, region)
}

fn currency_info(code: &str) -> Option<CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code == code).copied()
}

/// Resolved currency formatter.
#[derive(Debug, Clone)]
pub(crate) struct CurrencyFormatter {
    code: String,
    info: Option<CurrencyInfo>,
    home: bool,
    display: CurrencyDisplay,
    sign: CurrencySign,
    digits: Digits,
    conventions: &'static Conventions,
}

impl CurrencyFormatter {
    /// `None` when `code` is not a three-letter ISO 4217 code.
    pub(crate) fn new(
        locale: &Locale,
        code: &str,
        display: CurrencyDisplay,
        sign: CurrencySign,
        number: Option<&polyglot_config::NumberFormat>,
        conventions: &'static Conventions,
    ) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return None;
        }
        let info = currency_info(&code);
        let minor = info.map_or(2, |i| i.digits);
        Some(Self {
            home: currency_for_locale(locale) == Some(code.as_str()),
            code,
            info,
            display,
            sign,
            digits: Digits::resolve(number, minor, minor),
            conventions,
        })
    }

    /// ISO code being formatted
    pub(crate) fn code(&self) -> &str {
        &self.code
    }

    fn symbol(&self) -> &str {
        match (self.display, self.info) {
            (CurrencyDisplay::NarrowSymbol, Some(info)) => info.narrow,
            (CurrencyDisplay::Symbol, Some(info)) if self.home => info.narrow,
            (CurrencyDisplay::Symbol, Some(info)) => info.symbol,
            _ => self.code.as_str(),
        }
    }

    /// Same sign rule as `format_number`: nothing is printed for a negative
    /// value that rounds to zero.
    pub(crate) fn format(&self, value: f64) -> String {
        let rounded = format_magnitude(value, &self.digits, self.conventions);
        let negative = value.is_sign_negative() && !rounded.is_zero && !value.is_nan();

        let body = match (self.display, self.info) {
            (CurrencyDisplay::Name, Some(info)) if self.conventions.english_names => {
                let name = if rounded.is_one && self.digits.min_fraction == 0 {
                    info.name_one
                } else {
                    info.name_other
                };
                format!("{} {name}", rounded.text)
            }
            _ => {
                let symbol = self.symbol();
                let spaced = symbol.chars().last().is_some_and(char::is_alphabetic);
                match self.conventions.currency_position {
                    CurrencyPosition::Prefix if spaced => format!("{symbol} {}", rounded.text),
                    CurrencyPosition::Prefix => format!("{symbol}{}", rounded.text),
                    CurrencyPosition::PrefixSpaced => format!("{symbol} {}", rounded.text),
                    CurrencyPosition::Suffix => format!("{} {symbol}", rounded.text),
                }
            }
        };

        match (negative, self.sign) {
            (false, _) => body,
            (true, CurrencySign::Accounting) if self.conventions.accounting_parens => {
                format!("({body})")
            }
            (true, _) => format!("-{body}"),
        }
    }
}
