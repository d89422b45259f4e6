//! Export projection: turn stored entries into tabular report rows.
//!
//! Two projections exist, selected by the project filter. Filtering for the
//! special "PTO" project expands each entry into one row per calendar day
//! with non-zero hours; every other filter produces one weekly-total row per
//! entry. The resulting [`ExportTable`] is an ordered header + rows
//! structure ready for a spreadsheet sink; this crate ships a CSV encoding.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::timesheet::UNKNOWN_DEPARTMENT;
use crate::week::WEEK_KEY_FORMAT;

/// Calendar-date format used in PTO rows (`03/06/2024`, en-GB order).
const PTO_DATE_FORMAT: &str = "%d/%m/%Y";

/// One entry as read back from the store, ready for projection.
#[derive(Debug, Clone)]
pub struct ExportEntry {
    pub email: String,
    pub week_start: String,
    pub project: String,
    pub hours: Vec<f64>,
}

/// Ordered header + data rows, the interface every spreadsheet sink consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Encode the table as CSV text (header row first).
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(
            self.headers
                .iter()
                .map(|h| csv_escape(h))
                .collect::<Vec<_>>()
                .join(","),
        );
        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(|cell| csv_escape(cell))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }
}

/// Whether the project filter selects the calendar-day PTO projection.
pub fn is_pto_project(name: &str) -> bool {
    name.eq_ignore_ascii_case("pto")
}

/// Build the PTO projection: one row per entry per day with non-zero hours.
///
/// Columns: Employee, PTO Date, Hrs. The date is the entry's week start plus
/// the day offset within the week.
pub fn build_pto_table(entries: &[ExportEntry]) -> Result<ExportTable, CoreError> {
    let mut rows = Vec::new();
    for entry in entries {
        let base = NaiveDate::parse_from_str(&entry.week_start, WEEK_KEY_FORMAT).map_err(|_| {
            CoreError::Internal(format!(
                "Stored week key '{}' is not a valid date",
                entry.week_start
            ))
        })?;
        for (offset, &hours) in entry.hours.iter().enumerate() {
            if hours > 0.0 {
                let day = base + chrono::Duration::days(offset as i64);
                rows.push(vec![
                    entry.email.clone(),
                    day.format(PTO_DATE_FORMAT).to_string(),
                    format_hours(hours),
                ]);
            }
        }
    }
    Ok(ExportTable {
        headers: vec!["Employee", "PTO Date", "Hrs"],
        rows,
    })
}

/// Build the generic projection: one weekly-total row per entry.
///
/// Columns: Employee, Department, Project, Total Hrs. The department comes
/// from the *current* project set (keyed by trimmed lowercase name, falling
/// back to "Unknown"), not the snapshot stored on the entry. Entries whose
/// total is zero are skipped.
pub fn build_generic_table(
    entries: &[ExportEntry],
    department_by_project: &HashMap<String, String>,
) -> ExportTable {
    let mut rows = Vec::new();
    for entry in entries {
        let total: f64 = entry.hours.iter().sum();
        if total == 0.0 {
            continue;
        }
        let department = department_by_project
            .get(&entry.project.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DEPARTMENT);
        rows.push(vec![
            entry.email.clone(),
            department.to_string(),
            entry.project.clone(),
            format_hours(total),
        ]);
    }
    ExportTable {
        headers: vec!["Employee", "Department", "Project", "Total Hrs"],
        rows,
    }
}

/// Build the lowercase project-name -> department lookup for the generic
/// projection from (name, department) pairs of the current project set.
pub fn department_lookup<'a, I>(projects: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    projects
        .into_iter()
        .map(|(name, department)| (name.trim().to_lowercase(), department.to_string()))
        .collect()
}

/// Format an hour cell: whole values print without a decimal point
/// (`8`, not `8.0`), fractional values print as-is (`7.5`).
fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

/// Quote a CSV cell when it contains a comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
