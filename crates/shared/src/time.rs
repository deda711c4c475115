//! Lenient timestamp parsing for backend-provided date strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Error type for timestamp parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Empty timestamp")]
    Empty,
    #[error("Unrecognized timestamp format: {0}")]
    Unrecognized(String),
}

/// Naive formats the backend has emitted over time. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses a timestamp string.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, offsets allowed), SQL-style
/// naive datetimes (`2024-05-01 12:00:00`) and bare dates (`2024-05-01`,
/// midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(DateParseError::Unrecognized(raw.to_string()))
}

/// Parses an optional timestamp, degrading malformed input to `None`.
///
/// A warning is logged for malformed values; a missing value is not logged.
pub fn parse_timestamp_lenient(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match parse_timestamp(raw) {
        Ok(ts) => Some(ts),
        Err(DateParseError::Empty) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed timestamp");
            None
        }
    }
}

/// Deserializes an optional timestamp field without ever failing.
///
/// Use with `#[serde(default, deserialize_with = "shared::time::deserialize_lenient")]`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_timestamp_lenient(Some(&s)),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(value = %other, "Ignoring non-string timestamp");
            None
        }
    })
}
