//! Per-locale formatting conventions.
//!
//! A compact table covering the locales the engine ships data for. Lookup
//! matches on language plus region, then language alone, and finally falls
//! back to `en-US`.

use crate::locale::Locale;

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyPosition {
    /// `$1.00`
    Prefix,
    /// `R$ 1,00`
    PrefixSpaced,
    /// `1,00 €`
    Suffix,
}

/// Order of the numeric date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateOrder {
    Dmy,
    Mdy,
}

/// Layout of dates with a spelled-out month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextDate {
    /// `January 1, 1970`
    MonthDayYear,
    /// `1 de janeiro de 1970`, `1. Januar 1970`
    DayMonthYear {
        joiner: &'static str,
        day_suffix: &'static str,
    },
}

#[derive(Debug)]
pub(crate) struct Conventions {
    pub decimal: &'static str,
    pub group: &'static str,
    /// Integer digits required before grouping kicks in, beyond the first group
    pub min_grouping: usize,
    pub percent_spaced: bool,
    pub currency_position: CurrencyPosition,
    pub accounting_parens: bool,
    pub date_order: DateOrder,
    pub date_separator: &'static str,
    pub pad_date: bool,
    pub hour12: bool,
    pub pad_hour: bool,
    pub datetime_separator: &'static str,
    pub text_date: TextDate,
    pub weekday_separator: &'static str,
    pub abbreviation_dot: bool,
    pub months: [&'static str; 12],
    /// Monday first
    pub weekdays: [&'static str; 7],
    pub and: &'static str,
    pub or: &'static str,
    /// `None` joins unit lists with commas only
    pub unit_and: Option<&'static str>,
    pub serial_comma: bool,
    pub tight_degrees: bool,
    pub english_names: bool,
}

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const EN_WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const PT_MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];
const PT_WEEKDAYS: [&str; 7] = [
    "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira", "sexta-feira", "sábado",
    "domingo",
];

pub(crate) const EN_US: Conventions = Conventions {
    decimal: ".",
    group: ",",
    min_grouping: 1,
    percent_spaced: false,
    currency_position: CurrencyPosition::Prefix,
    accounting_parens: true,
    date_order: DateOrder::Mdy,
    date_separator: "/",
    pad_date: false,
    hour12: true,
    pad_hour: false,
    datetime_separator: ", ",
    text_date: TextDate::MonthDayYear,
    weekday_separator: ", ",
    abbreviation_dot: false,
    months: EN_MONTHS,
    weekdays: EN_WEEKDAYS,
    and: "and",
    or: "or",
    unit_and: None,
    serial_comma: true,
    tight_degrees: true,
    english_names: true,
};

const EN_GB: Conventions = Conventions {
    date_order: DateOrder::Dmy,
    pad_date: true,
    hour12: false,
    pad_hour: true,
    text_date: TextDate::DayMonthYear {
        joiner: " ",
        day_suffix: "",
    },
    weekday_separator: " ",
    serial_comma: false,
    ..EN_US
};

const PT_BR: Conventions = Conventions {
    decimal: ",",
    group: ".",
    min_grouping: 1,
    percent_spaced: false,
    currency_position: CurrencyPosition::PrefixSpaced,
    accounting_parens: false,
    date_order: DateOrder::Dmy,
    date_separator: "/",
    pad_date: true,
    hour12: false,
    pad_hour: true,
    datetime_separator: ", ",
    text_date: TextDate::DayMonthYear {
        joiner: " de ",
        day_suffix: "",
    },
    weekday_separator: ", ",
    abbreviation_dot: true,
    months: PT_MONTHS,
    weekdays: PT_WEEKDAYS,
    and: "e",
    or: "ou",
    unit_and: Some("e"),
    serial_comma: false,
    tight_degrees: false,
    english_names: false,
};

const PT_PT: Conventions = Conventions {
    group: "\u{a0}",
    min_grouping: 2,
    currency_position: CurrencyPosition::Suffix,
    ..PT_BR
};

const ES: Conventions = Conventions {
    decimal: ",",
    group: ".",
    min_grouping: 2,
    percent_spaced: true,
    currency_position: CurrencyPosition::Suffix,
    accounting_parens: false,
    date_order: DateOrder::Dmy,
    date_separator: "/",
    pad_date: false,
    hour12: false,
    pad_hour: false,
    datetime_separator: ", ",
    text_date: TextDate::DayMonthYear {
        joiner: " de ",
        day_suffix: "",
    },
    weekday_separator: ", ",
    abbreviation_dot: true,
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    weekdays: [
        "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
    ],
    and: "y",
    or: "o",
    unit_and: Some("y"),
    serial_comma: false,
    tight_degrees: false,
    english_names: false,
};

const FR: Conventions = Conventions {
    decimal: ",",
    group: "\u{202f}",
    min_grouping: 1,
    percent_spaced: true,
    currency_position: CurrencyPosition::Suffix,
    accounting_parens: false,
    date_order: DateOrder::Dmy,
    date_separator: "/",
    pad_date: true,
    hour12: false,
    pad_hour: true,
    datetime_separator: " ",
    text_date: TextDate::DayMonthYear {
        joiner: " ",
        day_suffix: "",
    },
    weekday_separator: " ",
    abbreviation_dot: true,
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    weekdays: [
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    and: "et",
    or: "ou",
    unit_and: Some("et"),
    serial_comma: false,
    tight_degrees: false,
    english_names: false,
};

const DE: Conventions = Conventions {
    decimal: ",",
    group: ".",
    min_grouping: 1,
    percent_spaced: true,
    currency_position: CurrencyPosition::Suffix,
    accounting_parens: false,
    date_order: DateOrder::Dmy,
    date_separator: ".",
    pad_date: false,
    hour12: false,
    pad_hour: true,
    datetime_separator: ", ",
    text_date: TextDate::DayMonthYear {
        joiner: " ",
        day_suffix: ".",
    },
    weekday_separator: ", ",
    abbreviation_dot: true,
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    weekdays: [
        "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
    ],
    and: "und",
    or: "oder",
    unit_and: Some("und"),
    serial_comma: false,
    tight_degrees: false,
    english_names: false,
};

/// Conventions for `locale`
pub(crate) fn conventions(locale: &Locale) -> &'static Conventions {
    match (locale.language(), locale.region()) {
        ("en", Some("GB" | "IE" | "AU" | "NZ" | "IN" | "ZA")) => &EN_GB,
        ("en", _) => &EN_US,
        ("pt", Some("PT" | "AO" | "MZ")) => &PT_PT,
        ("pt", _) => &PT_BR,
        ("es", _) => &ES,
        ("fr", _) => &FR,
        ("de", _) => &DE,
        _ => &EN_US,
    }
}
