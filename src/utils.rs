use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{RecurrenceError, Result};

/// Textual form of a calendar date, both on input and output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Date-time shapes accepted for exceptions; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| RecurrenceError::InvalidDate {
        input: input.to_string(),
    })
}

/// Parse an exception date, dropping any time-of-day component.
///
/// Accepts a bare `YYYY-MM-DD`, a local date-time (`T` or space separated),
/// or an RFC 3339 timestamp. For RFC 3339 the date written in the string is
/// kept as-is; no offset conversion happens.
pub fn parse_exception_date(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| RecurrenceError::InvalidDate {
            input: input.to_string(),
        })
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
