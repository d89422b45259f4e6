//! Handlers for the `/auth` resource (login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use cloksy_core::error::CoreError;
use cloksy_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response. `isAdmin` is surfaced directly because the
/// client gates its admin screens on it.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns a Bearer token plus the
/// user's role and admin flag.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid email".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.email, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        email: user.email,
        role: user.role,
        is_admin: user.is_admin,
    }))
}
