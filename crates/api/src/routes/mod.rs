pub mod admin;
pub mod auth;
pub mod banners;
pub mod catalog;
pub mod categories;
pub mod colors;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod rentals;
pub mod sizes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/products                   public catalog (?category=slug)
/// /catalog/products/{id}              public product detail
/// /catalog/categories                 public category list
/// /catalog/banners                    active banners
///
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
///
/// /products                           list, create
/// /products/reconcile-statuses        full reconciliation pass (POST)
/// /products/{id}                      get, update, delete
/// /products/{id}/reconcile-status     single-product pass (POST)
/// /products/{id}/variants             size variants (GET)
/// /products/{id}/images               list, attach
/// /products/{id}/images/{image_id}    detach (DELETE)
///
/// /categories                         list, create
/// /categories/{id}                    get, update, delete
///
/// /colors                             list, create
/// /colors/{id}                        update, delete
///
/// /sizes                              list, create
/// /sizes/{id}                         update, delete
///
/// /customers                          list (?search=name), create
/// /customers/{id}                     get, update, delete
///
/// /rentals                            list, create
/// /rentals/availability               availability check (POST)
/// /rentals/calendar                   month view (?year=&month=)
/// /rentals/{id}                       get, update, delete
/// /rentals/{id}/transitions           natural next statuses (GET)
///
/// /banners                            list, create
/// /banners/{id}                       get, update, delete
///
/// /dashboard/summary                  counters (GET)
/// /dashboard/activity                 recent events (GET)
///
/// /admin/users                        list, create (admin only)
/// /admin/users/{id}                   get, update (admin only)
/// /admin/notification-settings        get, update (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public storefront routes.
        .nest("/catalog", catalog::router())
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management + notification settings).
        .nest("/admin", admin::router())
        // Back-office resources.
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/colors", colors::router())
        .nest("/sizes", sizes::router())
        .nest("/customers", customers::router())
        .nest("/rentals", rentals::router())
        .nest("/banners", banners::router())
        .nest("/dashboard", dashboard::router())
}
