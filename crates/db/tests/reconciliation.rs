//! Integration tests for the single-pass product status reconciliation.

mod common;

use atelier_db::models::product::UpdateProduct;
use atelier_db::models::status::{ProductStatus, RentalStatus};
use atelier_db::repositories::ProductRepo;
use common::{seed_customer, seed_product, seed_rental};
use sqlx::PgPool;

fn set_status(status: ProductStatus) -> UpdateProduct {
    UpdateProduct {
        name: None,
        description: None,
        sku: None,
        base_sku: None,
        parent_product_id: None,
        is_variant: None,
        status_id: Some(status.id()),
        quantity: None,
        rental_price_cents: None,
        category_id: None,
        color_id: None,
        size_id: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rented_follows_active_rentals(pool: PgPool) {
    let customer = seed_customer(&pool).await;
    let gown = seed_product(&pool, "Silk Gown").await;
    let idle = seed_product(&pool, "Navy Suit").await;

    seed_rental(
        &pool,
        customer.id,
        "2024-06-01",
        "2024-06-05",
        RentalStatus::Pending.id(),
        &[gown.id],
    )
    .await;

    let changed = ProductRepo::reconcile_statuses(&pool).await.unwrap();
    assert_eq!(changed, 1);

    let gown = ProductRepo::find_by_id(&pool, gown.id).await.unwrap().unwrap();
    let idle = ProductRepo::find_by_id(&pool, idle.id).await.unwrap().unwrap();
    assert_eq!(gown.status_id, ProductStatus::Rented.id());
    assert_eq!(idle.status_id, ProductStatus::Available.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drifted_rented_flag_is_cleared(pool: PgPool) {
    let product = seed_product(&pool, "Lace Dress").await;

    // Simulate drift: marked rented with no rental backing it.
    ProductRepo::update(&pool, product.id, &set_status(ProductStatus::Rented))
        .await
        .unwrap();

    let changed = ProductRepo::reconcile_statuses(&pool).await.unwrap();
    assert_eq!(changed, 1);

    let product = ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.status_id, ProductStatus::Available.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn maintenance_is_left_untouched(pool: PgPool) {
    let customer = seed_customer(&pool).await;
    let product = seed_product(&pool, "Vintage Tuxedo").await;

    ProductRepo::update(&pool, product.id, &set_status(ProductStatus::Maintenance))
        .await
        .unwrap();

    // Even with an active rental referencing it, the manual override wins.
    seed_rental(
        &pool,
        customer.id,
        "2024-06-01",
        "2024-06-05",
        RentalStatus::Confirmed.id(),
        &[product.id],
    )
    .await;

    let changed = ProductRepo::reconcile_statuses(&pool).await.unwrap();
    assert_eq!(changed, 0);

    let product = ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.status_id, ProductStatus::Maintenance.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconciliation_is_idempotent(pool: PgPool) {
    let customer = seed_customer(&pool).await;
    let gown = seed_product(&pool, "Silk Gown").await;

    seed_rental(
        &pool,
        customer.id,
        "2024-06-01",
        "2024-06-05",
        RentalStatus::InProgress.id(),
        &[gown.id],
    )
    .await;

    assert_eq!(ProductRepo::reconcile_statuses(&pool).await.unwrap(), 1);
    assert_eq!(ProductRepo::reconcile_statuses(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_product_pass_reports_the_correction(pool: PgPool) {
    let customer = seed_customer(&pool).await;
    let gown = seed_product(&pool, "Silk Gown").await;
    let other = seed_product(&pool, "Navy Suit").await;

    seed_rental(
        &pool,
        customer.id,
        "2024-06-01",
        "2024-06-05",
        RentalStatus::Confirmed.id(),
        &[gown.id, other.id],
    )
    .await;

    // Only the requested product is corrected.
    let corrected = ProductRepo::reconcile_status(&pool, gown.id).await.unwrap();
    assert_eq!(corrected, Some(ProductStatus::Rented.id()));

    let other_row = ProductRepo::find_by_id(&pool, other.id).await.unwrap().unwrap();
    assert_eq!(other_row.status_id, ProductStatus::Available.id());

    // Second run: nothing to fix.
    assert_eq!(ProductRepo::reconcile_status(&pool, gown.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scoped_pass_ignores_other_products(pool: PgPool) {
    let drifting = seed_product(&pool, "Drifting").await;
    let also_drifting = seed_product(&pool, "Also Drifting").await;

    for id in [drifting.id, also_drifting.id] {
        ProductRepo::update(&pool, id, &set_status(ProductStatus::Rented))
            .await
            .unwrap();
    }

    let changed = ProductRepo::reconcile_products(&pool, &[drifting.id])
        .await
        .unwrap();
    assert_eq!(changed, 1);

    let untouched = ProductRepo::find_by_id(&pool, also_drifting.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status_id, ProductStatus::Rented.id());
}
