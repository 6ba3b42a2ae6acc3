//! Route definitions for the `/sizes` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sizes;
use crate::state::AppState;

/// Routes mounted at `/sizes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sizes::list).post(sizes::create))
        .route("/{id}", put(sizes::update).delete(sizes::delete))
}
