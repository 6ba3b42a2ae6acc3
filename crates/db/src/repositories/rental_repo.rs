//! Repository for the `rentals` table.
//!
//! Rental and line-item writes share one transaction: the original data
//! model rewrote items wholesale on every edit, and that contract is kept
//! here minus the crash window between the two statements.

use atelier_core::types::{Day, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::rental::{CreateRental, Rental, RentalWithCustomer, UpdateRental};
use crate::models::rental_item::RentalItemInput;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, contract_number, customer_id, event_date, rental_start_date, \
                       rental_end_date, status_id, total_amount_cents, deposit_amount_cents, \
                       notes, created_at, updated_at";

/// Columns for the rental-with-customer listing view.
const JOINED_COLUMNS: &str = "r.id, r.contract_number, r.customer_id, \
                              c.full_name AS customer_name, c.phone AS customer_phone, \
                              r.event_date, r.rental_start_date, r.rental_end_date, \
                              r.status_id, r.total_amount_cents, r.deposit_amount_cents, \
                              r.notes, r.created_at, r.updated_at";

/// Provides lifecycle operations for rentals.
pub struct RentalRepo;

impl RentalRepo {
    /// Create a rental and its line items in one transaction.
    ///
    /// The contract number comes from the server-side
    /// `generate_next_contract_number()` sequence function, so numbers
    /// are unique and strictly increasing under concurrent creates.
    pub async fn create_with_items(
        pool: &PgPool,
        input: &CreateRental,
        items: &[RentalItemInput],
    ) -> Result<Rental, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (contract_number,): (String,) =
            sqlx::query_as("SELECT generate_next_contract_number()")
                .fetch_one(&mut *tx)
                .await?;
        tracing::debug!(%contract_number, "Contract number assigned");

        let query = format!(
            "INSERT INTO rentals
                (contract_number, customer_id, event_date, rental_start_date,
                 rental_end_date, status_id, total_amount_cents, deposit_amount_cents, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 1), $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(&contract_number)
            .bind(input.customer_id)
            .bind(input.event_date)
            .bind(input.rental_start_date)
            .bind(input.rental_end_date)
            .bind(input.status_id)
            .bind(input.total_amount_cents)
            .bind(input.deposit_amount_cents)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        insert_items(&mut tx, rental.id, items).await?;

        tx.commit().await?;
        Ok(rental)
    }

    /// Update a rental; when `items` is `Some`, the existing line items
    /// are deleted and the new set reinserted (no diffing), all in one
    /// transaction. Only non-`None` rental fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_with_items(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRental,
        items: Option<&[RentalItemInput]>,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE rentals SET
                customer_id = COALESCE($2, customer_id),
                event_date = COALESCE($3, event_date),
                rental_start_date = COALESCE($4, rental_start_date),
                rental_end_date = COALESCE($5, rental_end_date),
                status_id = COALESCE($6, status_id),
                total_amount_cents = COALESCE($7, total_amount_cents),
                deposit_amount_cents = COALESCE($8, deposit_amount_cents),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(input.event_date)
            .bind(input.rental_start_date)
            .bind(input.rental_end_date)
            .bind(input.status_id)
            .bind(input.total_amount_cents)
            .bind(input.deposit_amount_cents)
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(rental) = rental else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(items) = items {
            sqlx::query("DELETE FROM rental_items WHERE rental_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_items(&mut tx, id, items).await?;
        }

        tx.commit().await?;
        Ok(Some(rental))
    }

    /// Find a rental by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rental>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rentals WHERE id = $1");
        sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all rentals with customer display fields, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RentalWithCustomer>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM rentals r
             JOIN customers c ON c.id = r.customer_id
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, RentalWithCustomer>(&query)
            .fetch_all(pool)
            .await
    }

    /// List rentals whose interval overlaps `[window_start, window_end]`
    /// (the admin calendar month view).
    pub async fn list_overlapping(
        pool: &PgPool,
        window_start: Day,
        window_end: Day,
    ) -> Result<Vec<RentalWithCustomer>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM rentals r
             JOIN customers c ON c.id = r.customer_id
             WHERE r.rental_start_date <= $2 AND r.rental_end_date >= $1
             ORDER BY r.rental_start_date"
        );
        sqlx::query_as::<_, RentalWithCustomer>(&query)
            .bind(window_start)
            .bind(window_end)
            .fetch_all(pool)
            .await
    }

    /// Delete a rental, returning the product ids of its former line
    /// items so the caller can reconcile them. Items cascade with the
    /// rental row. Returns `None` if the rental does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<DbId>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let product_ids: Vec<(DbId,)> =
            sqlx::query_as("SELECT product_id FROM rental_items WHERE rental_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(product_ids.into_iter().map(|(pid,)| pid).collect()))
    }
}

/// Insert line items for a rental inside an open transaction.
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rental_id: DbId,
    items: &[RentalItemInput],
) -> Result<(), sqlx::Error> {
    for item in items {
        insert_item(&mut *tx, rental_id, item).await?;
    }
    Ok(())
}

async fn insert_item(
    conn: &mut PgConnection,
    rental_id: DbId,
    item: &RentalItemInput,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO rental_items (rental_id, product_id, quantity)
         VALUES ($1, $2, COALESCE($3, 1))",
    )
    .bind(rental_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .execute(conn)
    .await?;
    Ok(())
}
