//! Repository for the `departments` table.

use sqlx::PgPool;

use cloksy_core::types::DbId;

use crate::models::department::Department;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all departments in insertion order (the employee-facing list).
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY id");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// List all departments sorted by name (the admin screen).
    pub async fn list_by_name(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY name");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Rename a department. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
