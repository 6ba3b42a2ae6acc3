//! Color reference entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A color row from the `colors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Color {
    pub id: DbId,
    pub name: String,
    /// Slug-like unique identifier (e.g. `off-white`).
    pub value: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new color. `value` defaults to the slugified name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateColor {
    pub name: String,
    pub value: Option<String>,
}

/// DTO for updating an existing color.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateColor {
    pub name: Option<String>,
    pub value: Option<String>,
}
