//! Timestamp helpers for the millisecond/nanosecond unix times the
//! exchange speaks and the ISO-8601 strings humans read.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Time durations in milliseconds.
pub mod ms {
    pub const SECOND: i64 = 1_000;
    pub const MINUTE: i64 = 60 * SECOND;
    pub const HOUR: i64 = 60 * MINUTE;
    pub const DAY: i64 = 24 * HOUR;
    pub const WEEK: i64 = 7 * DAY;
    pub const MONTH: i64 = 30 * DAY;
    pub const YEAR: i64 = 365 * DAY;
}

/// Current unix timestamp in milliseconds.
pub fn unix_now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current unix timestamp in seconds.
pub fn unix_now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Convert a millisecond unix timestamp to a UTC datetime.
pub fn millis_to_datetime(timestamp: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp)
        .single()
        .ok_or_else(|| Error::Validation(format!("timestamp out of range: {timestamp}")))
}

/// Convert a millisecond unix timestamp to an ISO 8601 string in UTC.
pub fn millis_to_iso(timestamp: i64) -> Result<String> {
    Ok(millis_to_datetime(timestamp)?.to_rfc3339())
}

/// Convert a UTC datetime to a millisecond unix timestamp.
pub fn datetime_to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Parse an ISO 8601 string into a millisecond unix timestamp.
pub fn iso_to_millis(iso: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| Error::Validation(format!("invalid ISO 8601 timestamp {iso:?}: {e}")))
}
