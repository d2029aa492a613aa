//! Date and time formatting.

use super::conventions::{Conventions, DateOrder, TextDate};
use crate::value::Value;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use polyglot_config::{DateFormat, MonthStyle, NumericStyle, TextStyle};
use tracing::debug;

/// Resolved date/time formatter.
#[derive(Debug, Clone)]
pub(crate) struct DateTimeFormatter {
    fields: DateFormat,
    hour12: bool,
    zone: Option<Tz>,
    conventions: &'static Conventions,
}

impl DateTimeFormatter {
    pub(crate) fn new(fields: DateFormat, conventions: &'static Conventions) -> Self {
        let zone = fields.time_zone.as_deref().and_then(|name| match name.parse::<Tz>() {
            Ok(zone) => Some(zone),
            Err(err) => {
                debug!(time_zone = name, error = %err, "Unknown time zone, using UTC");
                None
            }
        });
        Self {
            hour12: fields.hour12.unwrap_or(conventions.hour12),
            fields,
            zone,
            conventions,
        }
    }

    /// Format a date-like value; `None` when the value is not date-like.
    pub(crate) fn format(&self, value: &Value) -> Option<String> {
        let moment = self.wall_clock(value)?;
        let date = self.date_part(&moment);
        let time = self.time_part(&moment);
        Some(match (date, time) {
            (Some(date), Some(time)) => format!("{date}{}{time}", self.conventions.datetime_separator),
            (Some(part), None) | (None, Some(part)) => part,
            (None, None) => String::new(),
        })
    }

    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            Some(zone) => instant.with_timezone(&zone).naive_local(),
            None => instant.naive_utc(),
        }
    }

    fn wall_clock(&self, value: &Value) -> Option<NaiveDateTime> {
        match value {
            Value::Date(date) => date.and_hms_opt(0, 0, 0),
            Value::DateTime(moment) => Some(*moment),
            Value::Instant(instant) => Some(self.localize(*instant)),
            #[allow(clippy::cast_possible_truncation)]
            Value::Number(millis) if millis.is_finite() => Utc
                .timestamp_millis_opt(*millis as i64)
                .single()
                .map(|instant| self.localize(instant)),
            Value::Text(text) => self.parse_text(text.trim()),
            _ => None,
        }
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Some(self.localize(instant.with_timezone(&Utc)));
        }
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    fn pad(&self, value: u32, style: NumericStyle, locale_pads: bool) -> String {
        if style == NumericStyle::TwoDigit || locale_pads {
            format!("{value:02}")
        } else {
            value.to_string()
        }
    }

    fn abbreviate(&self, name: &str, style: TextStyle) -> String {
        match style {
            TextStyle::Long => name.to_string(),
            TextStyle::Short => {
                let short: String = name.chars().take(3).collect();
                if self.conventions.abbreviation_dot && short.chars().count() < name.chars().count() {
                    format!("{short}.")
                } else {
                    short
                }
            }
            TextStyle::Narrow => name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
        }
    }

    fn year(&self, moment: &NaiveDateTime, style: NumericStyle) -> String {
        match style {
            NumericStyle::Numeric => moment.year().to_string(),
            NumericStyle::TwoDigit => format!("{:02}", moment.year().rem_euclid(100)),
        }
    }

    fn weekday(&self, moment: &NaiveDateTime, style: TextStyle) -> String {
        let name = self.conventions.weekdays[moment.weekday().num_days_from_monday() as usize];
        self.abbreviate(name, style)
    }

    fn date_part(&self, moment: &NaiveDateTime) -> Option<String> {
        let fields = &self.fields;
        let weekday = fields.weekday.map(|style| self.weekday(moment, style));

        let body = match fields.month {
            Some(MonthStyle::Long | MonthStyle::Short | MonthStyle::Narrow) => Some(self.text_date(moment)),
            _ => self.numeric_date(moment),
        };

        match (weekday, body) {
            (Some(weekday), Some(body)) => {
                let separator = match fields.month {
                    Some(MonthStyle::Numeric | MonthStyle::TwoDigit) | None => ", ",
                    _ => self.conventions.weekday_separator,
                };
                Some(format!("{weekday}{separator}{body}"))
            }
            (weekday, body) => weekday.or(body),
        }
    }

    fn numeric_date(&self, moment: &NaiveDateTime) -> Option<String> {
        let fields = &self.fields;
        let pads = self.conventions.pad_date;
        let day = fields.day.map(|style| self.pad(moment.day(), style, pads));
        let month = fields.month.map(|style| {
            let style = match style {
                MonthStyle::TwoDigit => NumericStyle::TwoDigit,
                _ => NumericStyle::Numeric,
            };
            self.pad(moment.month(), style, pads)
        });
        let year = fields.year.map(|style| self.year(moment, style));

        let ordered = match self.conventions.date_order {
            DateOrder::Dmy => [day, month, year],
            DateOrder::Mdy => [month, day, year],
        };
        let parts: Vec<String> = ordered.into_iter().flatten().collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(self.conventions.date_separator))
        }
    }

    fn text_date(&self, moment: &NaiveDateTime) -> String {
        let fields = &self.fields;
        let month_name = self.conventions.months[moment.month0() as usize];
        let month = match fields.month {
            Some(MonthStyle::Short) => self.abbreviate(month_name, TextStyle::Short),
            Some(MonthStyle::Narrow) => self.abbreviate(month_name, TextStyle::Narrow),
            _ => month_name.to_string(),
        };
        let day = fields.day.map(|style| self.pad(moment.day(), style, false));
        let year = fields.year.map(|style| self.year(moment, style));

        match self.conventions.text_date {
            TextDate::MonthDayYear => {
                let mut out = month;
                if let Some(day) = &day {
                    out.push(' ');
                    out.push_str(day);
                }
                if let Some(year) = year {
                    if day.is_some() {
                        out.push(',');
                    }
                    out.push(' ');
                    out.push_str(&year);
                }
                out
            }
            TextDate::DayMonthYear { joiner, day_suffix } => {
                let mut parts = Vec::with_capacity(3);
                if let Some(day) = day {
                    parts.push(format!("{day}{day_suffix}"));
                }
                parts.push(month);
                parts.extend(year);
                parts.join(joiner)
            }
        }
    }

    fn time_part(&self, moment: &NaiveDateTime) -> Option<String> {
        let fields = &self.fields;
        let mut parts = Vec::with_capacity(3);

        if let Some(style) = fields.hour {
            let hour = if self.hour12 {
                match moment.hour() % 12 {
                    0 => 12,
                    h => h,
                }
            } else {
                moment.hour()
            };
            let locale_pads = !self.hour12 && self.conventions.pad_hour;
            parts.push(self.pad(hour, style, locale_pads));
        }
        if let Some(style) = fields.minute {
            parts.push(self.pad(moment.minute(), style, !parts.is_empty()));
        }
        if let Some(style) = fields.second {
            parts.push(self.pad(moment.second(), style, !parts.is_empty()));
        }

        if parts.is_empty() {
            return None;
        }
        let mut out = parts.join(":");
        if self.hour12 && fields.hour.is_some() {
            out.push_str(if moment.hour() < 12 { " AM" } else { " PM" });
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intl::conventions::conventions;
    use crate::locale::Locale;

    fn fields(day: bool, month: Option<MonthStyle>, year: bool, clock: bool) -> DateFormat {
        let numeric = |on: bool| on.then_some(NumericStyle::Numeric);
        DateFormat {
            day: numeric(day),
            month,
            year: numeric(year),
            hour: numeric(clock),
            minute: numeric(clock),
            ..DateFormat::default()
        }
    }

    fn format(tag: &str, fields: DateFormat, value: impl Into<Value>) -> Option<String> {
        let conv = conventions(&Locale::parse(tag).unwrap());
        DateTimeFormatter::new(fields, conv).format(&value.into())
    }

    fn epoch_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    }

    fn afternoon() -> NaiveDateTime {
        epoch_day().and_hms_opt(15, 0, 0).unwrap()
    }

    #[test]
    fn test_numeric_dates() {
        let date = fields(true, Some(MonthStyle::Numeric), true, false);
        assert_eq!(format("pt-BR", date.clone(), epoch_day()).unwrap(), "01/01/1970");
        assert_eq!(format("en-US", date.clone(), epoch_day()).unwrap(), "1/1/1970");
        assert_eq!(format("de-DE", date.clone(), epoch_day()).unwrap(), "1.1.1970");
        assert_eq!(format("en-GB", date, epoch_day()).unwrap(), "01/01/1970");
    }

    #[test]
    fn test_times() {
        let time = fields(false, None, false, true);
        assert_eq!(format("pt-BR", time.clone(), afternoon()).unwrap(), "15:00");
        assert_eq!(format("en-US", time.clone(), afternoon()).unwrap(), "3:00 PM");

        let forced = DateFormat {
            hour12: Some(false),
            ..time
        };
        assert_eq!(format("en-US", forced, afternoon()).unwrap(), "15:00");
    }

    #[test]
    fn test_datetime_joiner() {
        let both = fields(true, Some(MonthStyle::Numeric), true, true);
        assert_eq!(format("pt-BR", both.clone(), afternoon()).unwrap(), "01/01/1970, 15:00");
        assert_eq!(format("fr-FR", both.clone(), afternoon()).unwrap(), "01/01/1970 15:00");
        assert_eq!(format("en-US", both, afternoon()).unwrap(), "1/1/1970, 3:00 PM");
    }

    #[test]
    fn test_text_months() {
        let long = DateFormat {
            weekday: Some(TextStyle::Long),
            ..fields(true, Some(MonthStyle::Long), true, false)
        };
        assert_eq!(
            format("en-US", long.clone(), epoch_day()).unwrap(),
            "Thursday, January 1, 1970"
        );
        assert_eq!(
            format("pt-BR", long.clone(), epoch_day()).unwrap(),
            "quinta-feira, 1 de janeiro de 1970"
        );
        assert_eq!(
            format("de", long, epoch_day()).unwrap(),
            "Donnerstag, 1. Januar 1970"
        );

        let short = fields(true, Some(MonthStyle::Short), false, false);
        assert_eq!(format("en-US", short.clone(), epoch_day()).unwrap(), "Jan 1");
        assert_eq!(format("fr", short, epoch_day()).unwrap(), "1 jan.");
    }

    #[test]
    fn test_instants_use_time_zone() {
        let instant = Utc.with_ymd_and_hms(1970, 1, 1, 18, 0, 0).unwrap();
        let time = DateFormat {
            time_zone: Some("America/Sao_Paulo".to_string()),
            ..fields(false, None, false, true)
        };
        assert_eq!(format("pt-BR", time.clone(), instant).unwrap(), "15:00");
        assert_eq!(format("pt-BR", fields(false, None, false, true), instant).unwrap(), "18:00");

        let bogus_zone = DateFormat {
            time_zone: Some("Mars/Olympus".to_string()),
            ..time
        };
        assert_eq!(format("pt-BR", bogus_zone, instant).unwrap(), "18:00");
    }

    #[test]
    fn test_non_date_values() {
        let date = fields(true, Some(MonthStyle::Numeric), true, false);
        assert_eq!(format("pt-BR", date.clone(), "1970-01-01").unwrap(), "01/01/1970");
        assert_eq!(format("pt-BR", date.clone(), 0).unwrap(), "01/01/1970");
        assert!(format("pt-BR", date.clone(), "yesterday").is_none());
        assert!(format("pt-BR", date, true).is_none());
    }
}
