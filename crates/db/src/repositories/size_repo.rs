//! Repository for the `sizes` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::size::{CreateSize, Size, UpdateSize};

const COLUMNS: &str = "id, name, value, position, created_at";

/// Provides CRUD operations for sizes.
pub struct SizeRepo;

impl SizeRepo {
    /// Insert a new size. The caller resolves `value` before insert.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSize,
        value: &str,
    ) -> Result<Size, sqlx::Error> {
        let query = format!(
            "INSERT INTO sizes (name, value, position)
             VALUES ($1, $2, COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Size>(&query)
            .bind(&input.name)
            .bind(value)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Find a size by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Size>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sizes WHERE id = $1");
        sqlx::query_as::<_, Size>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sizes in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Size>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sizes ORDER BY position, name");
        sqlx::query_as::<_, Size>(&query).fetch_all(pool).await
    }

    /// Update a size. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSize,
    ) -> Result<Option<Size>, sqlx::Error> {
        let query = format!(
            "UPDATE sizes SET
                name = COALESCE($2, name),
                value = COALESCE($3, value),
                position = COALESCE($4, position)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Size>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    /// Delete a size by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sizes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
