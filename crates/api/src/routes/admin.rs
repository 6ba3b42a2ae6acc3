//! Route definitions for the `/admin` section (admin-only handlers).

use axum::routing::get;
use axum::Router;

use crate::handlers::{notification_settings, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users                      -> list
/// POST /users                      -> create
/// GET  /users/{id}                 -> get_by_id
/// PUT  /users/{id}                 -> update (deactivation revokes sessions)
/// GET  /notification-settings      -> get
/// PUT  /notification-settings      -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", get(users::get_by_id).put(users::update))
        .route(
            "/notification-settings",
            get(notification_settings::get).put(notification_settings::update),
        )
}
