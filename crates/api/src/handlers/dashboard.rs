//! Admin dashboard handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use atelier_db::models::dashboard::DashboardSummary;
use atelier_db::models::event::Event;
use atelier_db::repositories::{DashboardRepo, EventRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many events the activity feed returns.
const ACTIVITY_FEED_LIMIT: i64 = 50;

/// GET /api/v1/dashboard/summary
pub async fn summary(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = DashboardRepo::summary(&state.pool, Utc::now().date_naive()).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/dashboard/activity
///
/// Recent platform events, newest first.
pub async fn activity(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = EventRepo::list_recent(&state.pool, ACTIVITY_FEED_LIMIT).await?;
    Ok(Json(DataResponse { data: events }))
}
