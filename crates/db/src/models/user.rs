//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use cloksy_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] or [`UserEmail`] for external output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for the admin listing (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Email-only projection used by the export dropdown.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserEmail {
    pub email: String,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_admin: bool,
}
