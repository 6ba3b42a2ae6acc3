//! Admin handlers for the notification settings singleton.

use axum::extract::State;
use axum::Json;

use atelier_db::models::notification_settings::{NotificationSettings, UpdateNotificationSettings};
use atelier_db::repositories::NotificationSettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/notification-settings
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<NotificationSettings>>> {
    let settings = NotificationSettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/notification-settings
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateNotificationSettings>,
) -> AppResult<Json<DataResponse<NotificationSettings>>> {
    let settings = NotificationSettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(user_id = admin.user_id, "Notification settings updated");
    Ok(Json(DataResponse { data: settings }))
}
