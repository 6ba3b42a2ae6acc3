//! Route definitions for the `/products` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// POST   /reconcile-statuses        -> reconcile_all
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/reconcile-status     -> reconcile_one
/// GET    /{id}/variants             -> list_variants
/// GET    /{id}/images               -> list_images
/// POST   /{id}/images               -> add_image
/// DELETE /{id}/images/{image_id}    -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/reconcile-statuses", post(products::reconcile_all))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/{id}/reconcile-status", post(products::reconcile_one))
        .route("/{id}/variants", get(products::list_variants))
        .route(
            "/{id}/images",
            get(products::list_images).post(products::add_image),
        )
        .route("/{id}/images/{image_id}", axum::routing::delete(products::delete_image))
}
