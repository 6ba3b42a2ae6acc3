//! Route definitions for the `/colors` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::colors;
use crate::state::AppState;

/// Routes mounted at `/colors`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(colors::list).post(colors::create))
        .route("/{id}", put(colors::update).delete(colors::delete))
}
