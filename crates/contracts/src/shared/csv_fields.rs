//! Lenient field parsers for the snapshot CSV files.
//!
//! The files come from spreadsheet exports and pandas dumps, so booleans are
//! written as `1`/`0` and timestamps use a space separator with optional
//! microseconds.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp in any of the accepted layouts.
///
/// RFC 3339 values with an offset are converted to UTC.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let value = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.naive_utc())
        .map_err(|_| format!("unrecognized timestamp '{}'", value))
}

/// Parse a boolean flag: `1`/`0`, `true`/`false`, `yes`/`no`.
pub fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        other => Err(format!("unrecognized boolean '{}'", other)),
    }
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    // JSON bodies carry real booleans, CSV cells carry strings
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "unrecognized boolean '{}'",
            other
        ))),
        Flag::Text(s) => parse_flag(&s).map_err(serde::de::Error::custom),
    }
}
