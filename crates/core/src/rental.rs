//! Rental lifecycle rules.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker or CLI tooling.

use crate::product;
use crate::types::Day;

// ---------------------------------------------------------------------------
// Status ids
// ---------------------------------------------------------------------------

/// Rental status IDs matching `rental_statuses` seed data (1-based
/// SMALLSERIAL).
///
/// The ids are intentionally duplicated from the `db` crate's
/// `RentalStatus` enum because `core` must have zero internal deps.
pub mod status {
    pub const PENDING: i16 = 1;
    pub const CONFIRMED: i16 = 2;
    pub const IN_PROGRESS: i16 = 3;
    pub const COMPLETED: i16 = 4;
    pub const CANCELLED: i16 = 5;
}

/// Statuses that block a product: a rental in any of these holds its items.
pub const ACTIVE_STATUSES: [i16; 3] = [status::PENDING, status::CONFIRMED, status::IN_PROGRESS];

/// Whether a rental in this status counts toward availability conflicts
/// and status reconciliation.
pub fn is_active(status_id: i16) -> bool {
    ACTIVE_STATUSES.contains(&status_id)
}

/// Completed and cancelled rentals release their products for good.
pub fn is_terminal(status_id: i16) -> bool {
    status_id == status::COMPLETED || status_id == status::CANCELLED
}

/// A rental is overdue when its end date has passed and it was never
/// closed out. Overdue is derived at read time, never persisted.
pub fn is_overdue(end_date: Day, status_id: i16, today: Day) -> bool {
    end_date < today && !is_terminal(status_id)
}

// ---------------------------------------------------------------------------
// Transition table (advisory)
// ---------------------------------------------------------------------------

/// Returns the natural next statuses from `from_status`.
///
/// The table is advisory: the edit endpoint accepts any known status so
/// the back office can correct mistakes, but clients use this to render
/// sensible choices. Terminal states return an empty slice.
pub fn valid_transitions(from_status: i16) -> &'static [i16] {
    match from_status {
        // Pending -> Confirmed, Cancelled
        1 => &[2, 5],
        // Confirmed -> InProgress, Cancelled
        2 => &[3, 5],
        // InProgress -> Completed, Cancelled
        3 => &[4, 5],
        // Terminal states: Completed, Cancelled
        4 | 5 => &[],
        // Unknown status: no transitions suggested
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` follows the natural flow.
pub fn is_natural_transition(from: i16, to: i16) -> bool {
    valid_transitions(from).contains(&to)
}

/// Whether `status_id` names a known rental status at all.
pub fn is_known_status(status_id: i16) -> bool {
    (status::PENDING..=status::CANCELLED).contains(&status_id)
}

// ---------------------------------------------------------------------------
// Product side effects
// ---------------------------------------------------------------------------

/// The bulk product-status side effect of moving a rental into `to_status`.
///
/// Entering confirmed/in_progress marks attached products rented; closing
/// out (completed/cancelled) marks them available. Pending changes nothing
/// here — the reconciliation pass that follows every mutation settles any
/// product still held by another active rental.
pub fn product_status_effect(to_status: i16) -> Option<i16> {
    match to_status {
        status::CONFIRMED | status::IN_PROGRESS => Some(product::status::RENTED),
        status::COMPLETED | status::CANCELLED => Some(product::status::AVAILABLE),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
