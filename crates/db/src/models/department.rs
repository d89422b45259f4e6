//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cloksy_core::types::{DbId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a department.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
}
