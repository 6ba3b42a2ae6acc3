//! Integration tests for the rental lifecycle over HTTP: creation with
//! the availability gate, status side effects, reconciliation, and
//! deletion.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, delete_auth, get_auth, post_json, put_json, rental_body};
use sqlx::PgPool;

use atelier_db::models::status::{ProductStatus, RentalStatus};
use atelier_db::repositories::ProductRepo;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rental_books_products(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-04"), &[gown.id]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["rental"]["contract_number"].is_string());
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["reconciled"], true);

    // Pending rentals are active: reconciliation marks the product rented.
    let gown = ProductRepo::find_by_id(&pool, gown.id).await.unwrap().unwrap();
    assert_eq!(gown.status_id, ProductStatus::Rented.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_booking_is_rejected(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool);

    let first = post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id]),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Overlaps the first rental on 09-05.
    let second = post_json(
        app,
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-05"), d("2099-09-08"), &[gown.id]),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disjoint_booking_is_accepted(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id]),
    )
    .await;

    let disjoint = post_json(
        app,
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-06"), d("2099-09-08"), &[gown.id]),
    )
    .await;
    assert_eq!(disjoint.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reversed_dates_are_rejected(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-10"), d("2099-09-01"), &[gown.id]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editing_own_dates_never_self_conflicts(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool);

    let created = post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id]),
    )
    .await;
    let rental_id = body_json(created).await["data"]["rental"]["id"].as_i64().unwrap();

    // Shift inside its own window: must not conflict with itself.
    let updated = put_json(
        app,
        &format!("/api/v1/rentals/{rental_id}"),
        Some(&token),
        serde_json::json!({ "rental_start_date": "2099-09-02", "rental_end_date": "2099-09-06" }),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let json = body_json(updated).await;
    assert_eq!(json["data"]["rental"]["rental_end_date"], "2099-09-06");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_a_rental_releases_products(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool.clone());

    let created = post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id]),
    )
    .await;
    let rental_id = body_json(created).await["data"]["rental"]["id"].as_i64().unwrap();

    let completed = put_json(
        app,
        &format!("/api/v1/rentals/{rental_id}"),
        Some(&token),
        serde_json::json!({ "status_id": RentalStatus::Completed.id() }),
    )
    .await;
    assert_eq!(completed.status(), StatusCode::OK);

    let gown = ProductRepo::find_by_id(&pool, gown.id).await.unwrap().unwrap();
    assert_eq!(gown.status_id, ProductStatus::Available.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_rental_frees_unreferenced_products(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let suit = common::seed_product(&pool, "Navy Suit").await;
    let app = common::build_test_app(pool.clone());

    // The suit is also held by a second, surviving rental.
    let doomed = post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id, suit.id]),
    )
    .await;
    let doomed_id = body_json(doomed).await["data"]["rental"]["id"].as_i64().unwrap();

    post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-10"), d("2099-09-12"), &[suit.id]),
    )
    .await;

    let deleted = delete_auth(app, &format!("/api/v1/rentals/{doomed_id}"), &token).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let json = body_json(deleted).await;
    assert_eq!(json["data"]["freed_products"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["reconciled"], true);

    // The gown is free again; the suit is still held by the other rental.
    let gown = ProductRepo::find_by_id(&pool, gown.id).await.unwrap().unwrap();
    let suit = ProductRepo::find_by_id(&pool, suit.id).await.unwrap().unwrap();
    assert_eq!(gown.status_id, ProductStatus::Available.id());
    assert_eq!(suit.status_id, ProductStatus::Rented.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transitions_reflect_the_natural_flow(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let customer = common::seed_customer(&pool).await;
    let gown = common::seed_product(&pool, "Silk Gown").await;
    let app = common::build_test_app(pool);

    let created = post_json(
        app.clone(),
        "/api/v1/rentals",
        Some(&token),
        rental_body(customer.id, d("2099-09-01"), d("2099-09-05"), &[gown.id]),
    )
    .await;
    let rental_id = body_json(created).await["data"]["rental"]["id"].as_i64().unwrap();

    let response = get_auth(
        app,
        &format!("/api/v1/rentals/{rental_id}/transitions"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Pending -> Confirmed or Cancelled.
    assert_eq!(json["data"], serde_json::json!([2, 5]));
}
