//! Rental entity models and DTOs.

use atelier_core::rental;
use atelier_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A rental row from the `rentals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    /// Sequential, server-generated (`generate_next_contract_number()`).
    pub contract_number: String,
    pub customer_id: DbId,
    pub event_date: Option<Day>,
    pub rental_start_date: Day,
    pub rental_end_date: Day,
    pub status_id: StatusId,
    pub total_amount_cents: Option<i64>,
    pub deposit_amount_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Rental {
    /// Derived, never persisted: the end date has passed and the rental
    /// was never closed out.
    pub fn is_overdue(&self, today: Day) -> bool {
        rental::is_overdue(self.rental_end_date, self.status_id, today)
    }
}

/// DTO for creating a new rental (line items travel separately).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRental {
    pub customer_id: DbId,
    pub event_date: Option<Day>,
    pub rental_start_date: Day,
    pub rental_end_date: Day,
    /// Defaults to 1 (Pending).
    pub status_id: Option<StatusId>,
    pub total_amount_cents: Option<i64>,
    pub deposit_amount_cents: Option<i64>,
    pub notes: Option<String>,
}

/// DTO for updating an existing rental. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRental {
    pub customer_id: Option<DbId>,
    pub event_date: Option<Day>,
    pub rental_start_date: Option<Day>,
    pub rental_end_date: Option<Day>,
    pub status_id: Option<StatusId>,
    pub total_amount_cents: Option<i64>,
    pub deposit_amount_cents: Option<i64>,
    pub notes: Option<String>,
}

/// Typed view record for rental listings: the rental joined with its
/// customer's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalWithCustomer {
    pub id: DbId,
    pub contract_number: String,
    pub customer_id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub event_date: Option<Day>,
    pub rental_start_date: Day,
    pub rental_end_date: Day,
    pub status_id: StatusId,
    pub total_amount_cents: Option<i64>,
    pub deposit_amount_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RentalWithCustomer {
    pub fn is_overdue(&self, today: Day) -> bool {
        rental::is_overdue(self.rental_end_date, self.status_id, today)
    }
}
