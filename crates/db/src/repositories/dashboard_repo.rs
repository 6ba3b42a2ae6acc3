//! Aggregate queries behind the admin dashboard.

use atelier_core::rental::ACTIVE_STATUSES;
use atelier_core::types::Day;
use chrono::Days;
use sqlx::PgPool;

use crate::models::dashboard::DashboardSummary;

/// Provides dashboard aggregates.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Entity counters and rental health numbers as of `today`.
    pub async fn summary(pool: &PgPool, today: Day) -> Result<DashboardSummary, sqlx::Error> {
        let week_ahead = today
            .checked_add_days(Days::new(7))
            .unwrap_or(today);

        let row: (i64, i64, i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM products),
                (SELECT COUNT(*) FROM customers),
                (SELECT COUNT(*) FROM rentals WHERE status_id = ANY($1)),
                (SELECT COUNT(*) FROM rentals
                  WHERE status_id = ANY($1) AND rental_end_date < $2),
                (SELECT COUNT(*) FROM rentals
                  WHERE status_id = ANY($1) AND rental_end_date BETWEEN $2 AND $3)",
        )
        .bind(ACTIVE_STATUSES.to_vec())
        .bind(today)
        .bind(week_ahead)
        .fetch_one(pool)
        .await?;

        Ok(DashboardSummary {
            products: row.0,
            customers: row.1,
            active_rentals: row.2,
            overdue_rentals: row.3,
            returns_due_soon: row.4,
        })
    }
}
