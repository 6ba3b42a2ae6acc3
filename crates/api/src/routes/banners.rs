//! Route definitions for the `/banners` resource (admin side).

use axum::routing::get;
use axum::Router;

use crate::handlers::banners;
use crate::state::AppState;

/// Routes mounted at `/banners`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banners::list).post(banners::create))
        .route(
            "/{id}",
            get(banners::get_by_id)
                .put(banners::update)
                .delete(banners::delete),
        )
}
