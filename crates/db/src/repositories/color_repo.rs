//! Repository for the `colors` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::color::{Color, CreateColor, UpdateColor};

const COLUMNS: &str = "id, name, value, created_at";

/// Provides CRUD operations for colors.
pub struct ColorRepo;

impl ColorRepo {
    /// Insert a new color. The caller resolves `value` before insert.
    pub async fn create(
        pool: &PgPool,
        input: &CreateColor,
        value: &str,
    ) -> Result<Color, sqlx::Error> {
        let query = format!(
            "INSERT INTO colors (name, value) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(&input.name)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Find a color by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Color>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM colors WHERE id = $1");
        sqlx::query_as::<_, Color>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all colors alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Color>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM colors ORDER BY name");
        sqlx::query_as::<_, Color>(&query).fetch_all(pool).await
    }

    /// Update a color. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateColor,
    ) -> Result<Option<Color>, sqlx::Error> {
        let query = format!(
            "UPDATE colors SET
                name = COALESCE($2, name),
                value = COALESCE($3, value)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a color by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM colors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
