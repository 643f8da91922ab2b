//! Conversions between SQLite TEXT columns and domain values.
//!
//! Decimals and timestamps are stored as text. Parsing is tolerant: a value
//! that fails to parse is logged and replaced by a default, so one bad row
//! never makes a whole listing fail.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a decimal column, falling back to zero.
pub fn parse_decimal(value: &str, field: &str) -> Decimal {
    Decimal::from_str(value.trim())
        .or_else(|_| Decimal::from_scientific(value.trim()))
        .unwrap_or_else(|e| {
            error!("Failed to parse {} '{}' as decimal: {}", field, value, e);
            Decimal::ZERO
        })
}

pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses a `YYYY-MM-DD` column, falling back to the Unix epoch date.
pub fn parse_date(value: &str, field: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or_else(|e| {
        error!("Failed to parse {} '{}' as date: {}", field, value, e);
        DateTime::<Utc>::UNIX_EPOCH.date_naive()
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses an RFC 3339 timestamp column, falling back to the Unix epoch.
pub fn parse_timestamp(value: &str, field: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            error!("Failed to parse {} '{}' as timestamp: {}", field, value, e);
            DateTime::<Utc>::UNIX_EPOCH
        })
}

/// Fixed-width UTC timestamps, so text ordering matches time ordering.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
