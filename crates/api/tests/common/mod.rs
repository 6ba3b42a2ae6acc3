//! Shared fixtures for API integration tests.
//!
//! [`build_test_app`] mirrors the production router construction
//! (`router::build_app_router`) so tests exercise the same middleware
//! stack (CORS, request ID, timeout, tracing, panic recovery).

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use atelier_api::auth::jwt::{generate_access_token, JwtConfig};
use atelier_api::auth::password::hash_password;
use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_core::types::{Day, DbId};
use atelier_db::models::customer::{CreateCustomer, Customer};
use atelier_db::models::product::{CreateProduct, Product};
use atelier_db::repositories::{CustomerRepo, ProductRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(atelier_events::EventBus::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", path, token, body).await
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", path, token, body).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a staff user and mint an access token for it.
pub async fn staff_token(pool: &PgPool) -> String {
    token_for(pool, "staff").await
}

/// Create an admin user and mint an access token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    token_for(pool, "admin").await
}

async fn token_for(pool: &PgPool, role: &str) -> String {
    let hash = hash_password("test-password-123").expect("hash test password");
    let email = format!("{role}-{}@atelier.test", uuid::Uuid::new_v4());
    let user = UserRepo::create(pool, &email, &hash, "Test User", role)
        .await
        .expect("seed user");
    generate_access_token(user.id, role, &test_config().jwt).expect("mint token")
}

pub async fn seed_customer(pool: &PgPool) -> Customer {
    CustomerRepo::create(
        pool,
        &CreateCustomer {
            full_name: "Helena Prado".to_string(),
            phone: "+55 11 97777-0000".to_string(),
            email: None,
            document_number: None,
            address: None,
            notes: None,
        },
    )
    .await
    .expect("seed customer")
}

pub async fn seed_product(pool: &PgPool, name: &str) -> Product {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            description: None,
            sku: None,
            base_sku: None,
            parent_product_id: None,
            is_variant: None,
            status_id: None,
            quantity: None,
            rental_price_cents: None,
            category_id: None,
            color_id: None,
            size_id: None,
        },
    )
    .await
    .expect("seed product")
}

/// Build the JSON body for a rental create request, one unit per
/// product.
pub fn rental_body(
    customer_id: DbId,
    start: Day,
    end: Day,
    product_ids: &[DbId],
) -> serde_json::Value {
    let items: Vec<serde_json::Value> = product_ids
        .iter()
        .map(|id| serde_json::json!({ "product_id": id }))
        .collect();
    serde_json::json!({
        "customer_id": customer_id,
        "rental_start_date": start,
        "rental_end_date": end,
        "items": items,
    })
}
