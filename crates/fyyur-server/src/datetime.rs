//! Show start-time parsing and display.
//!
//! Start times are naive wall-clock timestamps. They travel as
//! `YYYY-MM-DD HH:MM:SS` and are shown in one of two named formats.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serializer;
use thiserror::Error;

/// Canonical string form of a start time.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a valid datetime value: '{0}'")]
pub struct DateTimeError(pub String);

/// Named display formats for start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    /// `Monday May, 21, 2035 at 9:30PM`
    Full,
    /// `Mon 05, 21, 2035 9:30PM`
    #[default]
    Medium,
}

impl DisplayFormat {
    fn pattern(self) -> &'static str {
        match self {
            DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

/// Current local wall-clock time, the reference point for past/upcoming.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn to_canonical(value: NaiveDateTime) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

/// Parse a submitted or stored start time.
///
/// RFC 3339 input carrying an offset is converted to local wall-clock time.
pub fn parse(value: &str) -> Result<NaiveDateTime, DateTimeError> {
    let trimmed = value.trim();
    for format in ACCEPTED_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| DateTimeError(trimmed.to_string()))
}

pub fn display(value: NaiveDateTime, format: DisplayFormat) -> String {
    value.format(format.pattern()).to_string()
}

/// Parse a start-time string and render it in a named display format.
pub fn format_datetime(value: &str, format: DisplayFormat) -> Result<String, DateTimeError> {
    parse(value).map(|parsed| display(parsed, format))
}

/// serde helper writing a start time in its canonical form.
pub fn serialize_start_time<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_canonical(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_canonical_round_trip() {
        let t = at(2035, 5, 21, 21, 30);
        let s = to_canonical(t);
        assert_eq!(s, "2035-05-21 21:30:00");
        assert_eq!(parse(&s).unwrap(), t);
    }

    #[test]
    fn test_parse_accepts_form_variants() {
        let expected = at(2019, 6, 15, 23, 0);
        assert_eq!(parse("2019-06-15 23:00:00").unwrap(), expected);
        assert_eq!(parse("2019-06-15 23:00").unwrap(), expected);
        assert_eq!(parse("2019-06-15T23:00:00").unwrap(), expected);
        assert_eq!(parse("2019-06-15T23:00").unwrap(), expected);
        assert_eq!(parse("  2019-06-15 23:00:00  ").unwrap(), expected);
        assert_eq!(parse("2019-06-15 23:00:00.000000").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("next tuesday").unwrap_err();
        assert_eq!(err, DateTimeError("next tuesday".into()));
        assert!(parse("").is_err());
    }

    #[test]
    fn test_full_format() {
        let t = at(2035, 5, 21, 21, 30);
        assert_eq!(
            display(t, DisplayFormat::Full),
            "Monday May, 21, 2035 at 9:30PM"
        );
    }

    #[test]
    fn test_medium_format() {
        let t = at(2035, 4, 1, 9, 5);
        assert_eq!(display(t, DisplayFormat::Medium), "Sun 04, 01, 2035 9:05AM");
    }

    #[test]
    fn test_format_datetime_from_string() {
        assert_eq!(
            format_datetime("2019-05-21 21:30:00", DisplayFormat::Medium).unwrap(),
            "Tue 05, 21, 2019 9:30PM"
        );
        assert!(format_datetime("not a date", DisplayFormat::Full).is_err());
    }
}
