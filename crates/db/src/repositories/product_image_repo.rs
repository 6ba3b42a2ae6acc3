//! Repository for the `product_images` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProductImage, ProductImage};

const COLUMNS: &str = "id, product_id, url, storage_key, position, is_primary, created_at";

/// Provides operations for product catalog images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Attach an image to a product.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateProductImage,
    ) -> Result<ProductImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_images (product_id, url, storage_key, position, is_primary)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(&input.url)
            .bind(&input.storage_key)
            .bind(input.position)
            .bind(input.is_primary)
            .fetch_one(pool)
            .await
    }

    /// List a product's images in display order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images
             WHERE product_id = $1
             ORDER BY is_primary DESC, position, id"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// List images for a batch of products in one query (catalog pages).
    pub async fn list_for_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM product_images
             WHERE product_id = ANY($1)
             ORDER BY product_id, is_primary DESC, position, id"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete an image from a product. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, product_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
