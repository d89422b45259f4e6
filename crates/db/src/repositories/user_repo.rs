//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserEmail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, is_admin, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (case-sensitive exact match, as stored).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by email.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY email");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List only user emails, for the export dropdown.
    pub async fn list_emails(pool: &PgPool) -> Result<Vec<UserEmail>, sqlx::Error> {
        sqlx::query_as::<_, UserEmail>("SELECT email FROM users ORDER BY email")
            .fetch_all(pool)
            .await
    }
}
