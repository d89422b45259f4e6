//! Timesheet entry reconciliation policy and weekly aggregation.
//!
//! A submission holds exactly seven daily hour values (Monday first). The
//! reconciliation decision table:
//!
//! | existing entry | all-zero hours | outcome  |
//! |----------------|----------------|----------|
//! | yes            | yes            | Deleted  |
//! | yes            | no             | Updated  |
//! | no             | yes            | NoOp     |
//! | no             | no             | Created  |
//!
//! Zero-hour entries are treated as "no data" and are never persisted.

use crate::error::CoreError;
use crate::types::DAYS_PER_WEEK;

/// Department recorded when the submitted project name has no matching
/// project row. Not an error: entries outlive their projects.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Canonicalize an email into the store key: lowercase and trimmed.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize submitted hours into exactly seven non-negative values.
///
/// Missing or null slots count as zero; a short vector is padded and a long
/// one truncated so the seven-slot invariant holds at the boundary.
pub fn normalize_hours(raw: &[Option<f64>]) -> Result<[f64; DAYS_PER_WEEK], CoreError> {
    let mut hours = [0.0; DAYS_PER_WEEK];
    for (slot, value) in hours.iter_mut().zip(raw.iter()) {
        let v = value.unwrap_or(0.0);
        if v < 0.0 || !v.is_finite() {
            return Err(CoreError::Validation(format!(
                "Hours must be non-negative numbers, got {v}"
            )));
        }
        *slot = v;
    }
    Ok(hours)
}

/// True iff every daily slot is zero -- the "nothing to store" predicate.
pub fn is_zero_hours(hours: &[f64; DAYS_PER_WEEK]) -> bool {
    hours.iter().all(|h| *h == 0.0)
}

/// Result of reconciling one submission against the current store state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// First non-zero submission for this (email, week, project).
    Created,
    /// Resubmission overwrote hours and refreshed the department snapshot.
    Updated,
    /// An all-zero resubmission removed the existing entry.
    Deleted,
    /// All-zero submission with no existing entry: nothing persisted.
    NoOp,
}

impl ReconcileOutcome {
    /// The response message for each outcome, as surfaced on the wire.
    pub fn message(self) -> &'static str {
        match self {
            ReconcileOutcome::Created => "Timesheet saved",
            ReconcileOutcome::Updated => "Timesheet updated",
            ReconcileOutcome::Deleted => "Timesheet entry deleted",
            ReconcileOutcome::NoOp => "No hours logged — nothing saved",
        }
    }
}

/// Sum every hour value across all entries of a week.
///
/// Entries contribute whatever their hour list holds; an empty list
/// contributes zero.
pub fn week_total<'a, I>(hour_lists: I) -> f64
where
    I: IntoIterator<Item = &'a [f64]>,
{
    hour_lists
        .into_iter()
        .map(|hours| hours.iter().sum::<f64>())
        .sum()
}

/// Format a weekly total to one decimal place (`"15.0"`).
pub fn format_total(total: f64) -> String {
    format!("{total:.1}")
}
