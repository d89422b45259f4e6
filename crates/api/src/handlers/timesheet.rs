//! Handlers for the `/timesheet` resource: entry reconciliation, weekly
//! aggregation, and CSV export.
//!
//! Identity is always the verified email from the Bearer token, normalized
//! before it touches the store. Week keys are aligned to Monday on every
//! write and on the summary read; the week-all read deliberately matches
//! the key as given so callers can replay exactly what they stored.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use cloksy_core::export::{
    build_generic_table, build_pto_table, department_lookup, is_pto_project, ExportEntry,
};
use cloksy_core::timesheet::{
    format_total, is_zero_hours, normalize_email, normalize_hours, week_total, ReconcileOutcome,
    UNKNOWN_DEPARTMENT,
};
use cloksy_core::week::align_week_start;
use cloksy_db::models::timesheet_entry::{ExportFilter, UpsertTimesheetEntry};
use cloksy_db::repositories::{ProjectRepo, TimesheetRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /timesheet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEntryRequest {
    pub week_start: String,
    pub project: String,
    /// Seven daily values, Monday first. Nulls and missing trailing slots
    /// count as zero.
    #[serde(default)]
    pub hours: Vec<Option<f64>>,
}

/// Outcome message, the response shape for `POST /timesheet`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Query parameters for `GET /timesheet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub week_start: String,
    pub project: String,
}

/// Query parameters for `GET /timesheet/week-summary`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummaryQuery {
    pub week_start: String,
}

/// Query parameters for `GET /timesheet/week-all`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAllQuery {
    pub week_start: Option<String>,
    /// Optional identity override for the copy-previous-week screen.
    pub email: Option<String>,
}

/// Query parameters for `GET /timesheet/export`.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub department: Option<String>,
    pub project: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Response body for `GET /timesheet/week-summary`.
#[derive(Debug, Serialize)]
pub struct WeekSummaryResponse {
    /// Total hours formatted to one decimal place.
    pub total: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/timesheet
///
/// Reconcile one submission against the current store state. At most one
/// write happens per call, as a single conditional statement keyed on
/// (email, weekStart, project) so concurrent same-key submissions cannot
/// interleave.
pub async fn save_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveEntryRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&user.email);
    let project = input.project.trim().to_string();

    if input.week_start.trim().is_empty() || project.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let week_start = align_week_start(&input.week_start)?;
    let hours = normalize_hours(&input.hours)?;

    tracing::debug!(%email, %week_start, %project, "Timesheet submission");

    let outcome = if is_zero_hours(&hours) {
        // Zero hours: delete if present, otherwise nothing to do.
        let deleted = TimesheetRepo::delete_by_key(&state.pool, &email, &week_start, &project)
            .await?;
        if deleted {
            ReconcileOutcome::Deleted
        } else {
            ReconcileOutcome::NoOp
        }
    } else {
        // Non-zero hours: snapshot the department and upsert.
        let department = ProjectRepo::find_by_name(&state.pool, &project)
            .await?
            .map(|p| p.department)
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string());

        let upserted = TimesheetRepo::upsert(
            &state.pool,
            &UpsertTimesheetEntry {
                email: email.clone(),
                week_start: week_start.clone(),
                project: project.clone(),
                department,
                hours: hours.to_vec(),
            },
        )
        .await?;
        if upserted.inserted {
            ReconcileOutcome::Created
        } else {
            ReconcileOutcome::Updated
        }
    };

    tracing::info!(%email, %week_start, %project, ?outcome, "Timesheet reconciled");

    Ok(Json(MessageResponse {
        message: outcome.message(),
    }))
}

/// GET /api/timesheet?weekStart=&project=
///
/// Fetch a single project's entry for the (aligned) week. Responds with the
/// entry, or an empty object when none exists.
pub async fn get_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let email = normalize_email(&user.email);
    let week_start = align_week_start(&query.week_start)?;
    let project = query.project.trim();

    let entry = TimesheetRepo::find_by_key(&state.pool, &email, &week_start, project).await?;

    match entry {
        Some(entry) => Ok(Json(serde_json::to_value(entry).map_err(|e| {
            AppError::InternalError(format!("Serialization error: {e}"))
        })?)),
        None => Ok(Json(serde_json::json!({}))),
    }
}

/// GET /api/timesheet/week-summary?weekStart=
///
/// Total hours across all of the user's entries for the aligned week,
/// formatted to one decimal place. An empty week totals "0.0".
pub async fn week_summary(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<WeekSummaryQuery>,
) -> AppResult<Json<WeekSummaryResponse>> {
    let email = normalize_email(&user.email);
    let week_start = align_week_start(&query.week_start)?;

    let entries = TimesheetRepo::find_for_week(&state.pool, &email, &week_start).await?;
    let total = week_total(entries.iter().map(|e| e.hours.as_slice()));

    Ok(Json(WeekSummaryResponse {
        total: format_total(total),
    }))
}

/// GET /api/timesheet/week-all?weekStart=&email?=
///
/// Every entry for the given week key, matched as an exact string with no
/// re-alignment -- the caller owns the key. Accepts an email override for
/// copying another identity's previous week.
pub async fn week_all(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<WeekAllQuery>,
) -> AppResult<impl IntoResponse> {
    let week = match query.week_start.as_deref() {
        Some(w) if !w.is_empty() => w.to_string(),
        _ => return Err(AppError::BadRequest("Missing weekStart".into())),
    };
    let email = normalize_email(query.email.as_deref().unwrap_or(&user.email));

    let entries = TimesheetRepo::find_for_week(&state.pool, &email, &week).await?;

    tracing::debug!(%email, %week, count = entries.len(), "Week-all lookup");

    Ok(Json(entries))
}

/// GET /api/timesheet/export?department?=&project?=&start?=&end?=
///
/// Export the user's matching entries as a CSV attachment. Filtering for
/// the special "PTO" project produces calendar-day rows; anything else
/// produces weekly-total rows. A filter matching nothing is 404, distinct
/// from a server failure. The body is built in full before the response
/// starts, so no failure can occur after headers are sent.
pub async fn export(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = ExportFilter {
        email: normalize_email(&user.email),
        department: query.department.clone(),
        project: query.project.clone(),
        start: query.start.clone(),
        end: query.end.clone(),
    };

    let entries = TimesheetRepo::find_for_export(&state.pool, &filter).await?;
    if entries.is_empty() {
        return Err(AppError::NotFound("No timesheet data found".into()));
    }

    let export_entries: Vec<ExportEntry> = entries
        .into_iter()
        .map(|e| ExportEntry {
            email: e.email,
            week_start: e.week_start,
            project: e.project,
            hours: e.hours,
        })
        .collect();

    let is_pto = query.project.as_deref().is_some_and(is_pto_project);
    let table = if is_pto {
        build_pto_table(&export_entries).map_err(AppError::Core)?
    } else {
        // Generic rows resolve departments from the current project set,
        // not the stored snapshot.
        let projects = ProjectRepo::list(&state.pool).await?;
        let lookup = department_lookup(
            projects
                .iter()
                .map(|p| (p.name.as_str(), p.department.as_str())),
        );
        build_generic_table(&export_entries, &lookup)
    };

    tracing::info!(
        email = %filter.email,
        rows = table.rows.len(),
        pto = is_pto,
        "Timesheet export generated"
    );

    let filename = format!("Timesheet_{}.csv", chrono::Utc::now().timestamp_millis());
    Ok(axum::response::Response::builder()
        .status(200)
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(axum::body::Body::from(table.to_csv()))
        .map_err(|e| AppError::InternalError(format!("Response build error: {e}")))?
        .into_response())
}
