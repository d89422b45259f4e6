//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require an admin token except the
/// project listing, which any authenticated user may read.
///
/// ```text
/// GET    /departments            -> list_departments (sorted by name)
/// POST   /departments            -> create_department
/// PUT    /departments/{id}       -> update_department
/// DELETE /departments/{id}       -> delete_department
///
/// GET    /projects               -> list_projects (department, then name)
/// POST   /projects               -> create_project
/// PUT    /projects/{id}          -> update_project
/// DELETE /projects/{id}          -> delete_project
///
/// GET    /users                  -> list_users
/// POST   /users                  -> create_user
///
/// POST   /cleanup-duplicates     -> cleanup_duplicates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(admin::list_departments).post(admin::create_department),
        )
        .route(
            "/departments/{id}",
            put(admin::update_department).delete(admin::delete_department),
        )
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route(
            "/projects/{id}",
            put(admin::update_project).delete(admin::delete_project),
        )
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/cleanup-duplicates", post(admin::cleanup_duplicates))
}
