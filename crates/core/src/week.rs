//! Canonical week-key alignment.
//!
//! Every timesheet entry is keyed by the Monday of its reporting week,
//! formatted as a fixed-width `YYYY-MM-DD` string. Alignment is pure
//! calendar arithmetic on (year, month, day) -- no wall clock, no timezone.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Canonical week-key format (`2024-06-03`).
pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

/// Align a calendar date to the Monday of its week.
///
/// Idempotent: a Monday maps to itself.
pub fn align_to_monday(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Parse a raw `YYYY-M-D` week marker, align it to Monday, and format the
/// canonical fixed-width key.
///
/// Parsing is lenient about zero padding (`2024-6-3` is accepted); the
/// output is always zero padded. Unparseable input is a validation error,
/// never a garbage key.
pub fn align_week_start(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, WEEK_KEY_FORMAT)
        .map_err(|_| CoreError::Validation(format!("Invalid week start date: '{trimmed}'")))?;
    Ok(align_to_monday(date).format(WEEK_KEY_FORMAT).to_string())
}
