//! Integration tests for login, refresh rotation, and route protection.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json};
use sqlx::PgPool;

use atelier_api::auth::password::hash_password;
use atelier_db::repositories::UserRepo;

async fn seed_login_user(pool: &PgPool, email: &str, password: &str, active: bool) {
    let hash = hash_password(password).unwrap();
    let user = UserRepo::create(pool, email, &hash, "Dora Castro", "staff")
        .await
        .unwrap();
    if !active {
        UserRepo::update(
            pool,
            user.id,
            &atelier_db::models::user::UpdateUser {
                display_name: None,
                role: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_user(pool: PgPool) {
    seed_login_user(&pool, "dora@atelier.test", "a-strong-password", true).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "dora@atelier.test", "password": "a-strong-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "dora@atelier.test");
    // The password hash must never appear in a response.
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    seed_login_user(&pool, "dora@atelier.test", "a-strong-password", true).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "dora@atelier.test", "password": "nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_login(pool: PgPool) {
    seed_login_user(&pool, "gone@atelier.test", "a-strong-password", false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "gone@atelier.test", "password": "a-strong-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    seed_login_user(&pool, "dora@atelier.test", "a-strong-password", true).await;
    let app = common::build_test_app(pool);

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "dora@atelier.test", "password": "a-strong-password" }),
    )
    .await;
    let login_json = body_json(login).await;
    let refresh_token = login_json["data"]["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and yields a new pair.
    let refreshed = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);
    let refreshed_json = body_json(refreshed).await;
    assert_ne!(
        refreshed_json["data"]["refresh_token"].as_str().unwrap(),
        refresh_token
    );

    // The old token was revoked by the rotation.
    let replayed = post_json(
        app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replayed.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_reject_missing_and_bad_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let anonymous = common::get(app.clone(), "/api/v1/products").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(app, "/api/v1/products", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_staff_tokens(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/users", &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_can_manage_users(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = post_json(
        app.clone(),
        "/api/v1/admin/users",
        Some(&admin),
        serde_json::json!({
            "email": "new-staff@atelier.test",
            "password": "long-enough-pw",
            "display_name": "New Staff",
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_json = body_json(created).await;
    assert_eq!(created_json["data"]["role"], "staff");

    let listed = get_auth(app, "/api/v1/admin/users", &admin).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed_json = body_json(listed).await;
    assert!(listed_json["data"].as_array().unwrap().len() >= 2);
}
