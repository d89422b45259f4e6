//! Repository for the `projects` table.

use sqlx::PgPool;

use cloksy_core::types::DbId;

use crate::models::project::{Project, ProjectInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, client, department, status, created_at, updated_at";

/// Provides CRUD and lookup operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &ProjectInput,
        status: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, client, department, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.client.as_deref().unwrap_or(""))
            .bind(&input.department)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Find a project by exact, case-sensitive name. This is the department
    /// snapshot lookup used at entry save time.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY name");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List all projects grouped for the admin screen: department, then name.
    pub async fn list_by_department(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY department, name");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Find every project whose name is in `names` (exact match), oldest
    /// first so duplicate cleanup is deterministic.
    pub async fn find_by_names(pool: &PgPool, names: &[&str]) -> Result<Vec<Project>, sqlx::Error> {
        let owned: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(&owned)
            .fetch_all(pool)
            .await
    }

    /// Replace a project's fields. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectInput,
        status: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                client = $3,
                department = $4,
                status = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.client.as_deref().unwrap_or(""))
            .bind(&input.department)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every project whose id is in `ids`, returning the removed count.
    pub async fn delete_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
