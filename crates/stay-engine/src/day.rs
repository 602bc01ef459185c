//! Calendar-day normalization.
//!
//! Reservations arrive as ISO 8601 strings with arbitrary time-of-day and offset.
//! Everything downstream works on `NaiveDate`, so this is the only place that
//! knows about clocks and time zones.

use crate::error::{Result, StayError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name (e.g. "Europe/Paris").
///
/// # Errors
/// Returns `StayError::InvalidTimezone` if the name is not a known IANA identifier.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| StayError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO 8601 string into the calendar day it denotes in `tz`.
///
/// Accepted forms:
/// - RFC 3339 with an offset (`2024-06-10T00:00:00.000Z`, `...+02:00`): the
///   instant is converted into `tz` and its local date is taken.
/// - Naive date-time (`2024-06-10T14:30:00`, optional fractional seconds): the
///   written date is taken as-is.
/// - Plain date (`2024-06-10`).
///
/// # Errors
/// Returns `StayError::InvalidDate` when none of the forms match.
pub fn parse_day(s: &str, tz: Tz) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).date_naive());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ndt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StayError::InvalidDate(format!("'{}': {}", s, e)))
}

/// The current calendar day in `tz`, read from the system clock.
///
/// Predicates never call this themselves; callers pass the result in so the
/// same inputs always give the same answer.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Iterate every day in `[first, last]` inclusive. Empty when `last < first`.
pub fn days_inclusive(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first
        .iter_days()
        .take_while(move |d| *d <= last)
}
