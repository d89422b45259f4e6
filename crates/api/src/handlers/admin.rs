//! Handlers for the `/admin` resource: department, project, and user
//! management, plus duplicate cleanup of the seeded default projects.
//!
//! All handlers require an admin token via [`RequireAdmin`], except the
//! project listing which any authenticated user may read.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use cloksy_core::error::CoreError;
use cloksy_core::timesheet::normalize_email;
use cloksy_core::types::DbId;
use cloksy_db::models::department::{Department, DepartmentInput};
use cloksy_db::models::project::{
    Project, ProjectInput, DEFAULT_PROJECT_STATUS, PROJECT_STATUSES,
};
use cloksy_db::models::user::{CreateUser, UserResponse};
use cloksy_db::repositories::{DepartmentRepo, ProjectRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The seeded always-available projects, kept unique by duplicate cleanup.
const DEFAULT_PROJECT_NAMES: [&str; 3] = ["PTO", "Company Holiday", "Company Event"];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    #[serde(rename = "isAdmin")]
    pub is_admin: Option<bool>,
}

/// Response body for `POST /admin/cleanup-duplicates`.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// GET /api/admin/departments
///
/// All departments sorted by name.
pub async fn list_departments(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list_by_name(&state.pool).await?;
    Ok(Json(departments))
}

/// POST /api/admin/departments
///
/// Create a department. Duplicate names are a 409.
pub async fn create_department(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<DepartmentInput>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Department name is required".into(),
        )));
    }

    let department = DepartmentRepo::create(&state.pool, name).await?;

    tracing::info!(department_id = department.id, user_id = admin.user_id, "Department created");

    Ok((StatusCode::CREATED, Json(department)))
}

/// PUT /api/admin/departments/{id}
///
/// Rename a department.
pub async fn update_department(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DepartmentInput>,
) -> AppResult<Json<Department>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Department name is required".into(),
        )));
    }

    let department = DepartmentRepo::update(&state.pool, id, name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    tracing::info!(department_id = id, user_id = admin.user_id, "Department updated");

    Ok(Json(department))
}

/// DELETE /api/admin/departments/{id}
///
/// Delete a department. Returns 204 No Content.
pub async fn delete_department(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }));
    }

    tracing::info!(department_id = id, user_id = admin.user_id, "Department deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/admin/projects
///
/// All projects grouped by department, then name. Auth-only: the admin
/// screen shares this list with the entry form.
pub async fn list_projects(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_department(&state.pool).await?;
    Ok(Json(projects))
}

/// POST /api/admin/projects
///
/// Create a project. Status defaults to Active and must be one of the
/// known statuses.
pub async fn create_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let status = validate_project_input(&input)?;

    let project = ProjectRepo::create(&state.pool, &input, status).await?;

    tracing::info!(project_id = project.id, user_id = admin.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/admin/projects/{id}
///
/// Replace a project's fields.
pub async fn update_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<Project>> {
    let status = validate_project_input(&input)?;

    let project = ProjectRepo::update(&state.pool, id, &input, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = id, user_id = admin.user_id, "Project updated");

    Ok(Json(project))
}

/// DELETE /api/admin/projects/{id}
///
/// Delete a project. Existing timesheet entries keep their department
/// snapshot and fall back to "Unknown" in future exports.
pub async fn delete_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(project_id = id, user_id = admin.user_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/admin/users
///
/// All users as safe projections (no password hashes).
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/admin/users
///
/// Create a user. Validates password strength, hashes it, and returns a
/// safe [`UserResponse`] with 201 Created. The email is normalized the
/// same way timesheet identities are.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let email = normalize_email(&input.email);
    if email.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email is required".into(),
        )));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email,
        password_hash: hashed,
        role: input.role.unwrap_or_else(|| "employee".to_string()),
        is_admin: input.is_admin.unwrap_or(false),
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(new_user_id = user.id, user_id = admin.user_id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ---------------------------------------------------------------------------
// Duplicate cleanup
// ---------------------------------------------------------------------------

/// POST /api/admin/cleanup-duplicates
///
/// Remove duplicate rows of the seeded default projects, keeping one per
/// name and preferring the copy in the `general` department.
pub async fn cleanup_duplicates(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<CleanupResponse>> {
    let all = ProjectRepo::find_by_names(&state.pool, &DEFAULT_PROJECT_NAMES).await?;

    let mut to_keep: Vec<&Project> = Vec::new();
    let mut to_delete: Vec<DbId> = Vec::new();

    for project in &all {
        match to_keep.iter_mut().find(|kept| kept.name == project.name) {
            None => to_keep.push(project),
            Some(kept) => {
                if project.department == "general" && kept.department != "general" {
                    to_delete.push(kept.id);
                    *kept = project;
                } else {
                    to_delete.push(project.id);
                }
            }
        }
    }

    let removed = if to_delete.is_empty() {
        0
    } else {
        ProjectRepo::delete_ids(&state.pool, &to_delete).await?
    };

    tracing::info!(removed, user_id = admin.user_id, "Duplicate default projects removed");

    Ok(Json(CleanupResponse {
        message: format!("Removed {removed} duplicate special projects."),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check the required project fields and resolve the status, defaulting to
/// Active when absent.
fn validate_project_input(input: &ProjectInput) -> Result<&str, AppError> {
    if input.name.trim().is_empty() || input.department.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name and department are required".into(),
        )));
    }
    match input.status.as_deref() {
        None => Ok(DEFAULT_PROJECT_STATUS),
        Some(status) if PROJECT_STATUSES.contains(&status) => Ok(status),
        Some(other) => Err(AppError::Core(CoreError::Validation(format!(
            "Invalid project status: '{other}'"
        )))),
    }
}
