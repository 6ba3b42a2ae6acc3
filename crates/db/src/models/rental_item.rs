//! Rental line item models and DTOs.
//!
//! Line items are rewritten wholesale on every rental edit (delete all,
//! reinsert the new set) — there is no per-item diffing.

use atelier_core::availability::RentalWindow;
use atelier_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rental_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalItem {
    pub id: DbId,
    pub rental_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// Inbound line item shape inside rental create/update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalItemInput {
    pub product_id: DbId,
    /// Defaults to 1.
    pub quantity: Option<i32>,
}

/// Typed view record: a line item joined with its product's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalItemWithProduct {
    pub id: DbId,
    pub rental_id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub quantity: i32,
}

/// Typed view record for availability checks: one active rental holding
/// one product. Maps onto [`RentalWindow`] for the core rules.
#[derive(Debug, Clone, FromRow)]
pub struct RentalWindowRow {
    pub rental_id: DbId,
    pub product_id: DbId,
    pub contract_number: String,
    pub rental_start_date: Day,
    pub rental_end_date: Day,
    pub status_id: i16,
}

impl From<RentalWindowRow> for RentalWindow {
    fn from(row: RentalWindowRow) -> Self {
        RentalWindow {
            rental_id: row.rental_id,
            product_id: row.product_id,
            contract_number: row.contract_number,
            rental_start_date: row.rental_start_date,
            rental_end_date: row.rental_end_date,
            status_id: row.status_id,
        }
    }
}
