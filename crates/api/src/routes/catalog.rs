//! Route definitions for the public `/catalog` resource.
//!
//! These routes carry no auth extractor: the storefront is anonymous.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/categories", get(catalog::list_categories))
        .route("/banners", get(catalog::list_banners))
}
