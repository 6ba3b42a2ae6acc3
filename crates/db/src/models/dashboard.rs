//! Admin dashboard summary shapes.

use serde::Serialize;

/// Counters rendered on the admin dashboard landing page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub products: i64,
    pub customers: i64,
    pub active_rentals: i64,
    /// Active rentals whose end date has already passed.
    pub overdue_rentals: i64,
    /// Active rentals ending within the next 7 days.
    pub returns_due_soon: i64,
}
