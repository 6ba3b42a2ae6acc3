//! Availability query: the typed fetch feeding the core availability
//! rules.

use atelier_core::availability::RentalWindow;
use atelier_core::rental::ACTIVE_STATUSES;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::rental_item::RentalWindowRow;

/// Fetches the active rental windows referencing a set of products.
pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// Every (active rental, product) pair for the given products.
    ///
    /// The overlap test, overdue derivation, and self-conflict exclusion
    /// are applied by `atelier_core::availability::assess` on the
    /// returned windows.
    pub async fn active_windows_for_products(
        pool: &PgPool,
        product_ids: &[DbId],
    ) -> Result<Vec<RentalWindow>, sqlx::Error> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<RentalWindowRow> = sqlx::query_as(
            "SELECT r.id AS rental_id, ri.product_id, r.contract_number,
                    r.rental_start_date, r.rental_end_date, r.status_id
             FROM rental_items ri
             JOIN rentals r ON r.id = ri.rental_id
             WHERE ri.product_id = ANY($1)
               AND r.status_id = ANY($2)
             ORDER BY r.rental_start_date, r.id",
        )
        .bind(product_ids)
        .bind(ACTIVE_STATUSES.to_vec())
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(RentalWindow::from).collect())
    }
}
