//! Repository for the `rental_items` table (reads; writes happen inside
//! the rental transaction in `RentalRepo`).

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::rental_item::{RentalItem, RentalItemWithProduct};

const COLUMNS: &str = "id, rental_id, product_id, quantity, created_at";

/// Provides read operations for rental line items.
pub struct RentalItemRepo;

impl RentalItemRepo {
    /// List the line items of a rental.
    pub async fn list_for_rental(
        pool: &PgPool,
        rental_id: DbId,
    ) -> Result<Vec<RentalItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rental_items WHERE rental_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, RentalItem>(&query)
            .bind(rental_id)
            .fetch_all(pool)
            .await
    }

    /// List the line items of a rental joined with product names, for
    /// contract and detail views.
    pub async fn list_with_products(
        pool: &PgPool,
        rental_id: DbId,
    ) -> Result<Vec<RentalItemWithProduct>, sqlx::Error> {
        sqlx::query_as::<_, RentalItemWithProduct>(
            "SELECT ri.id, ri.rental_id, ri.product_id, p.name AS product_name, ri.quantity
             FROM rental_items ri
             JOIN products p ON p.id = ri.product_id
             WHERE ri.rental_id = $1
             ORDER BY ri.id",
        )
        .bind(rental_id)
        .fetch_all(pool)
        .await
    }

    /// The product ids attached to a rental.
    pub async fn product_ids_for_rental(
        pool: &PgPool,
        rental_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT product_id FROM rental_items WHERE rental_id = $1")
                .bind(rental_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
