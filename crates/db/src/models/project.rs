//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cloksy_core::types::{DbId, Timestamp};

/// Valid project statuses, in display order.
pub const PROJECT_STATUSES: [&str; 3] = ["Active", "Hold", "Complete"];

/// Default status for newly created projects.
pub const DEFAULT_PROJECT_STATUS: &str = "Active";

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client: String,
    pub department: String,
    /// One of [`PROJECT_STATUSES`]; also CHECK-constrained in-schema.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    /// Optional in the request; stored as an empty string when absent.
    pub client: Option<String>,
    pub department: String,
    /// Defaults to `Active` when absent.
    pub status: Option<String>,
}
