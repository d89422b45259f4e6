//! Route definitions for the `/timesheet` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::timesheet;
use crate::state::AppState;

/// Routes mounted at `/timesheet`. All require authentication.
///
/// ```text
/// POST /               -> save_entry (reconcile one submission)
/// GET  /               -> get_entry (single project, single week)
/// GET  /week-summary   -> week_summary (total hours, aligned week)
/// GET  /week-all       -> week_all (exact week-key match)
/// GET  /export         -> export (CSV attachment)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timesheet::get_entry).post(timesheet::save_entry))
        .route("/week-summary", get(timesheet::week_summary))
        .route("/week-all", get(timesheet::week_all))
        .route("/export", get(timesheet::export))
}
