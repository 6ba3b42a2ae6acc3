//! Product status rules, including the reconciliation decision.
//!
//! `products.status_id` is a derived cache of "is this product held by an
//! active rental", with `maintenance` as a manual override. The rules for
//! recomputing it live here; the single-statement SQL pass in the `db`
//! crate encodes the same decisions.

// ---------------------------------------------------------------------------
// Status ids
// ---------------------------------------------------------------------------

/// Product status IDs matching `product_statuses` seed data (1-based
/// SMALLSERIAL).
///
/// Intentionally duplicated from the `db` crate's `ProductStatus` enum
/// because `core` must have zero internal deps.
pub mod status {
    pub const AVAILABLE: i16 = 1;
    pub const RENTED: i16 = 2;
    pub const MAINTENANCE: i16 = 3;
}

/// The status a product should carry given whether any active rental
/// currently references it.
pub fn derived_status(has_active_rental: bool) -> i16 {
    if has_active_rental {
        status::RENTED
    } else {
        status::AVAILABLE
    }
}

/// Whether reconciliation may touch a product in `current_status`.
///
/// `maintenance` is manual-only: never set, never cleared by the
/// reconciler.
pub fn is_reconcilable(current_status: i16) -> bool {
    current_status != status::MAINTENANCE
}

/// The correction (if any) reconciliation should apply.
///
/// Returns `Some(new_status)` when the stored status has drifted from the
/// derived one and the product is not under manual override.
pub fn reconcile(current_status: i16, has_active_rental: bool) -> Option<i16> {
    if !is_reconcilable(current_status) {
        return None;
    }
    let desired = derived_status(has_active_rental);
    (current_status != desired).then_some(desired)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_status_follows_active_rentals() {
        assert_eq!(derived_status(true), status::RENTED);
        assert_eq!(derived_status(false), status::AVAILABLE);
    }

    #[test]
    fn maintenance_is_never_reconciled() {
        assert_eq!(reconcile(status::MAINTENANCE, true), None);
        assert_eq!(reconcile(status::MAINTENANCE, false), None);
    }

    #[test]
    fn drifted_statuses_are_corrected() {
        assert_eq!(reconcile(status::AVAILABLE, true), Some(status::RENTED));
        assert_eq!(reconcile(status::RENTED, false), Some(status::AVAILABLE));
    }

    #[test]
    fn settled_statuses_are_left_alone() {
        assert_eq!(reconcile(status::AVAILABLE, false), None);
        assert_eq!(reconcile(status::RENTED, true), None);
    }
}
