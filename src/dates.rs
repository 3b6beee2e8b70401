//! Date parsing and day-key extraction
//!
//! Campaign logs carry dates in two formats: `YYYY-MM-DD HH:MM:SS.mmm`
//! (milliseconds are discarded) and bare `YYYY-MM-DD`. The format is chosen
//! by looking for the separating space rather than by slicing a fixed-width
//! millisecond suffix off the end, so date-only strings never take the
//! timestamp path.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::AnalysisError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of bytes in a `YYYY-MM-DD` day key
pub const DAY_KEY_LEN: usize = 10;

/// Parse a date string in either accepted format.
///
/// Timestamps keep their time-of-day with sub-second precision dropped;
/// date-only strings resolve to midnight.
pub fn parse_date(date: &str) -> Result<NaiveDateTime, AnalysisError> {
    if date.contains(' ') {
        let parsed = NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT)
            .map_err(|_| AnalysisError::DateParse(date.to_string()))?;
        // Milliseconds are parsed but not kept
        Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
    } else {
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| AnalysisError::DateParse(date.to_string()))
    }
}

/// Extract the `YYYY-MM-DD` day key: the first ten bytes of a date string.
///
/// Strings shorter than ten bytes (or with a multi-byte character spanning
/// the boundary) are rejected instead of yielding a truncated key.
pub fn day_key(date: &str) -> Result<&str, AnalysisError> {
    date.get(..DAY_KEY_LEN)
        .ok_or_else(|| AnalysisError::TruncatedDate(date.to_string()))
}

/// Parse a day key into a calendar date
pub fn parse_day(day: &str) -> Result<NaiveDate, AnalysisError> {
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_err(|_| AnalysisError::DateParse(day.to_string()))
}
