//! Repository for the `banners` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::banner::{Banner, CreateBanner, UpdateBanner};

const COLUMNS: &str =
    "id, title, image_url, storage_key, link_url, position, is_active, created_at, updated_at";

/// Provides CRUD operations for site banners.
pub struct BannerRepo;

impl BannerRepo {
    /// Insert a new banner, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBanner) -> Result<Banner, sqlx::Error> {
        let query = format!(
            "INSERT INTO banners (title, image_url, storage_key, link_url, position, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.storage_key)
            .bind(&input.link_url)
            .bind(input.position)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a banner by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners WHERE id = $1");
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all banners in display order (admin view).
    pub async fn list(pool: &PgPool) -> Result<Vec<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners ORDER BY position, id");
        sqlx::query_as::<_, Banner>(&query).fetch_all(pool).await
    }

    /// List only active banners in display order (public storefront).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Banner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM banners WHERE is_active ORDER BY position, id"
        );
        sqlx::query_as::<_, Banner>(&query).fetch_all(pool).await
    }

    /// Update a banner. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBanner,
    ) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!(
            "UPDATE banners SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                storage_key = COALESCE($4, storage_key),
                link_url = COALESCE($5, link_url),
                position = COALESCE($6, position),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.storage_key)
            .bind(&input.link_url)
            .bind(input.position)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a banner by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
