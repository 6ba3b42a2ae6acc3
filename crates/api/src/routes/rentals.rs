//! Route definitions for the `/rentals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rentals;
use crate::state::AppState;

/// Routes mounted at `/rentals`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// POST   /availability        -> check_availability
/// GET    /calendar            -> calendar (?year=&month=)
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/transitions    -> transitions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rentals::list).post(rentals::create))
        .route("/availability", post(rentals::check_availability))
        .route("/calendar", get(rentals::calendar))
        .route(
            "/{id}",
            get(rentals::get_by_id)
                .put(rentals::update)
                .delete(rentals::delete),
        )
        .route("/{id}/transitions", get(rentals::transitions))
}
