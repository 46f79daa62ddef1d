//! Naive ISO-8601 timestamp helpers.
//!
//! All calendar values in fitcoach are naive: no timezone is attached and
//! values carrying an offset are converted to their UTC instant on entry.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date or date-time string into a naive instant.
///
/// `field` only names the input in the returned error.
pub fn parse_timestamp(field: &str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ValidationError::InvalidTimestamp {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Strip the time-of-day component.
pub fn midnight(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}

/// Render a naive instant the way stored records carry it.
///
/// Fractional seconds are only printed when non-zero.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Half-open window `[midnight, midnight + 24h)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    /// Window for the day containing `ts`.
    pub fn containing(ts: NaiveDateTime) -> Self {
        let start = midnight(ts);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Parse a date (or date-time) string and normalize it to its day window.
    pub fn parse(date: &str) -> Result<Self, ValidationError> {
        parse_timestamp("date", date).map(Self::containing)
    }

    /// Whether `ts` falls inside the window. The end boundary is excluded.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts < self.end
    }

    /// Calendar day the window covers.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}
