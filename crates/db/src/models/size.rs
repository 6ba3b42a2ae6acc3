//! Size reference entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A size row from the `sizes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Size {
    pub id: DbId,
    pub name: String,
    /// Slug-like unique identifier (e.g. `42`, `m`).
    pub value: String,
    /// Display order in size selectors (smallest first).
    pub position: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new size. `value` defaults to the slugified name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSize {
    pub name: String,
    pub value: Option<String>,
    pub position: Option<i32>,
}

/// DTO for updating an existing size.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSize {
    pub name: Option<String>,
    pub value: Option<String>,
    pub position: Option<i32>,
}
