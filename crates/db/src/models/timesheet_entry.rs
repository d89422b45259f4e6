//! Timesheet entry model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use cloksy_core::types::{DbId, Timestamp};

/// A row from the `timesheet_entries` table.
///
/// At most one row exists per (email, week_start, project); the constraint
/// `uq_timesheet_entries_email_week_project` enforces it in-schema.
/// Serialized with camelCase keys -- the wire shape clients consume.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: DbId,
    /// Lowercase, trimmed user key.
    pub email: String,
    /// Canonical Monday week key (`YYYY-MM-DD`), stored as text so the
    /// exact-string read contract and the string-sortable range filter
    /// survive intact.
    pub week_start: String,
    /// Trimmed project name as submitted.
    pub project: String,
    /// Department snapshot taken from the project at save time. Deliberately
    /// stale if the project later moves departments: historical exports must
    /// reflect the department the hours were booked under.
    pub department: String,
    /// Exactly seven values, Monday first.
    pub hours: Vec<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Write payload for the reconciliation upsert. All normalization (email,
/// week alignment, hour padding) happens before this is constructed.
#[derive(Debug, Clone)]
pub struct UpsertTimesheetEntry {
    pub email: String,
    pub week_start: String,
    pub project: String,
    pub department: String,
    pub hours: Vec<f64>,
}

/// Upsert result: the stored row plus whether the statement inserted
/// (as opposed to overwrote) it.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedTimesheetEntry {
    #[sqlx(flatten)]
    pub entry: TimesheetEntry,
    pub inserted: bool,
}

/// Filter for the export read path. `email` is always present; the optional
/// matches are case-insensitive exact, and the week range only applies when
/// both ends are given (inclusive, on the string-sortable key).
#[derive(Debug, Clone)]
pub struct ExportFilter {
    pub email: String,
    pub department: Option<String>,
    pub project: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
