//! Reference-list handlers backing the entry and export screens.

use axum::extract::State;
use axum::Json;

use cloksy_db::models::department::Department;
use cloksy_db::models::project::Project;
use cloksy_db::models::user::UserEmail;
use cloksy_db::repositories::{DepartmentRepo, ProjectRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/departments
///
/// All departments, for any authenticated user.
pub async fn list_departments(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/projects
///
/// All projects, for any authenticated user.
pub async fn list_projects(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/users
///
/// User emails only, feeding the export dropdown.
pub async fn list_users(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserEmail>>> {
    let users = UserRepo::list_emails(&state.pool).await?;
    Ok(Json(users))
}
