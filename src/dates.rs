//! Calendar date arithmetic
//!
//! All day-level date math used by the engine and the input boundary lives
//! here. Dates are plain calendar dates with no time zone attached.

use crate::error::ForecastError;
use chrono::{DateTime, Duration, NaiveDate};

/// ISO calendar date format used for input and output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Add a (possibly negative) number of days to a date.
///
/// Fails with [`ForecastError::InvalidDate`] when the result falls outside the
/// representable calendar.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ForecastError> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            ForecastError::InvalidDate(format!(
                "{} + {} days is outside the supported calendar range",
                format_date(date),
                days
            ))
        })
}

/// Signed number of whole days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, in which case the calendar
/// date in the timestamp's own offset is used.
pub fn parse_date(input: &str) -> Result<NaiveDate, ForecastError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| {
            ForecastError::InvalidDate(format!(
                "'{}' is not a YYYY-MM-DD date or RFC 3339 timestamp",
                input
            ))
        })
}

/// Render a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
