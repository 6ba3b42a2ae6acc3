//! Rental availability rules.
//!
//! Given the set of active rental windows that reference a group of
//! products, [`assess`] decides per product whether a requested date range
//! is bookable, and flags products blocked by overdue returns. The `db`
//! crate supplies the windows as typed rows; every decision is made here.
//!
//! Date intervals are inclusive on both ends: `[start, end]` overlaps
//! `[qstart, qend]` iff `start <= qend && end >= qstart`.

use serde::Serialize;

use crate::rental;
use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One active rental holding one product — the typed shape of the
/// `rentals ⋈ rental_items` join the availability query returns.
#[derive(Debug, Clone, Serialize)]
pub struct RentalWindow {
    pub rental_id: DbId,
    pub product_id: DbId,
    pub contract_number: String,
    pub rental_start_date: Day,
    pub rental_end_date: Day,
    pub status_id: i16,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Availability label for one product. Overdue takes precedence over a
/// plain booking conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Booked,
    Overdue,
}

/// Per-product result of an availability check.
#[derive(Debug, Clone, Serialize)]
pub struct ProductAvailability {
    pub product_id: DbId,
    pub is_available: bool,
    pub is_overdue: bool,
    pub status: AvailabilityStatus,
    /// Active rentals overlapping the requested window.
    pub conflicting_rentals: Vec<RentalWindow>,
    /// Active rentals whose end date has already passed. These block the
    /// product regardless of the requested window.
    pub overdue_rentals: Vec<RentalWindow>,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Inclusive interval overlap test.
pub fn intervals_overlap(start: Day, end: Day, query_start: Day, query_end: Day) -> bool {
    start <= query_end && end >= query_start
}

/// Classify each requested product against the candidate rental windows.
///
/// `windows` is expected to hold the rentals referencing the requested
/// products; rows in a non-active status or belonging to
/// `exclude_rental_id` are ignored here, so callers may pass the raw
/// fetch result. `exclude_rental_id` suppresses self-conflicts when a
/// rental's own dates are being edited.
///
/// Duplicate product ids are collapsed; report order follows the first
/// occurrence of each id.
pub fn assess(
    product_ids: &[DbId],
    windows: &[RentalWindow],
    start_date: Day,
    end_date: Day,
    exclude_rental_id: Option<DbId>,
    today: Day,
) -> Vec<ProductAvailability> {
    let candidates: Vec<&RentalWindow> = windows
        .iter()
        .filter(|w| rental::is_active(w.status_id))
        .filter(|w| Some(w.rental_id) != exclude_rental_id)
        .collect();

    let mut seen = Vec::new();
    let mut reports = Vec::new();

    for &product_id in product_ids {
        if seen.contains(&product_id) {
            continue;
        }
        seen.push(product_id);

        let conflicting_rentals: Vec<RentalWindow> = candidates
            .iter()
            .filter(|w| w.product_id == product_id)
            .filter(|w| {
                intervals_overlap(w.rental_start_date, w.rental_end_date, start_date, end_date)
            })
            .map(|w| (*w).clone())
            .collect();

        let overdue_rentals: Vec<RentalWindow> = candidates
            .iter()
            .filter(|w| w.product_id == product_id)
            .filter(|w| w.rental_end_date < today)
            .map(|w| (*w).clone())
            .collect();

        let is_overdue = !overdue_rentals.is_empty();
        let is_available = conflicting_rentals.is_empty() && !is_overdue;
        let status = if is_overdue {
            AvailabilityStatus::Overdue
        } else if !conflicting_rentals.is_empty() {
            AvailabilityStatus::Booked
        } else {
            AvailabilityStatus::Available
        };

        reports.push(ProductAvailability {
            product_id,
            is_available,
            is_overdue,
            status,
            conflicting_rentals,
            overdue_rentals,
        });
    }

    reports
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
