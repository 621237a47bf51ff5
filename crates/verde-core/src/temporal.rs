//! # Event Dates — Epoch-Millisecond Parsing
//!
//! Receipt documents state event dates twice: as a human-readable string in
//! the structured data (`"2024-03-01"` or a full RFC 3339 instant) and as
//! an epoch-millisecond integer in the flat attribute list (the form NFT
//! display layers expect). This module parses the string form so the two
//! can be compared.
//!
//! A bare calendar date is interpreted as midnight UTC. Local-time inputs
//! without an offset are not accepted: an ambiguous instant would make the
//! attribute comparison depend on the validator's host timezone.

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::error::TemporalError;

/// Parse a calendar date (`YYYY-MM-DD`) or RFC 3339 datetime to epoch
/// milliseconds.
///
/// # Errors
///
/// Returns [`TemporalError::InvalidDate`] when the input matches neither
/// form. The error carries the original input and the parser diagnostic so
/// the caller can report it as an invalid-date finding.
pub fn parse_epoch_millis(input: &str) -> Result<i64, TemporalError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| TemporalError::InvalidDate {
            input: input.to_string(),
            reason: e.to_string(),
        })
}
