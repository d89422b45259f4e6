pub mod admin;
pub mod auth;
pub mod health;
pub mod timesheet;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
///
/// /timesheet                       save entry (POST), single entry (GET)
/// /timesheet/week-summary          weekly total (GET)
/// /timesheet/week-all              all entries for a week key (GET)
/// /timesheet/export                CSV export (GET)
///
/// /departments                     department list (auth required)
/// /projects                        project list (auth required)
/// /users                           user emails for export dropdown (auth required)
///
/// /admin/departments               list, create (admin only)
/// /admin/departments/{id}          update, delete
/// /admin/projects                  list (auth), create (admin only)
/// /admin/projects/{id}             update, delete
/// /admin/users                     list, create (admin only)
/// /admin/cleanup-duplicates        dedupe default projects (POST, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login only; token issuance has no refresh flow).
        .nest("/auth", auth::router())
        // Timesheet reconciliation, aggregation, and export.
        .nest("/timesheet", timesheet::router())
        // Admin management of departments, projects, and users.
        .nest("/admin", admin::router())
        // Reference lists for the entry and export screens.
        .route("/departments", get(handlers::directory::list_departments))
        .route("/projects", get(handlers::directory::list_projects))
        .route("/users", get(handlers::directory::list_users))
}
