//! Integration tests for entity CRUD at the repository layer.
//!
//! Exercises the real database: unique constraints, the variant/parent
//! check, partial updates, and list ordering.

use atelier_db::models::banner::{CreateBanner, UpdateBanner};
use atelier_db::models::category::{CreateCategory, UpdateCategory};
use atelier_db::models::color::CreateColor;
use atelier_db::models::customer::{CreateCustomer, UpdateCustomer};
use atelier_db::models::product::{CreateProduct, CreateProductImage, UpdateProduct};
use atelier_db::models::status::ProductStatus;
use atelier_db::repositories::{
    BannerRepo, CategoryRepo, ColorRepo, CustomerRepo, ProductImageRepo, ProductRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: None,
        description: None,
        position: None,
    }
}

fn new_product(name: &str) -> CreateProduct {
    CreateProduct {
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
    }
}

fn new_customer(name: &str) -> CreateCustomer {
    CreateCustomer {
        full_name: name.to_string(),
        phone: "+55 11 99999-0000".to_string(),
        email: None,
        document_number: None,
        address: None,
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_slug_must_be_unique(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Evening Gowns"), "evening-gowns")
        .await
        .unwrap();

    let err = CategoryRepo::create(&pool, &new_category("Other"), "evening-gowns")
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_categories_slug"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_lookup_by_slug_and_partial_update(pool: PgPool) {
    let created = CategoryRepo::create(&pool, &new_category("Veils"), "veils")
        .await
        .unwrap();

    let found = CategoryRepo::find_by_slug(&pool, "veils").await.unwrap();
    assert_eq!(found.unwrap().id, created.id);

    // Update only the position; name and slug must survive.
    let updated = CategoryRepo::update(
        &pool,
        created.id,
        &UpdateCategory {
            name: None,
            slug: None,
            description: None,
            position: Some(5),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Veils");
    assert_eq!(updated.slug, "veils");
    assert_eq!(updated.position, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn categories_list_in_display_order(pool: PgPool) {
    let mut last = new_category("Last");
    last.position = Some(10);
    CategoryRepo::create(&pool, &last, "last").await.unwrap();

    let mut first = new_category("First");
    first.position = Some(1);
    CategoryRepo::create(&pool, &first, "first").await.unwrap();

    let names: Vec<String> = CategoryRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["First".to_string(), "Last".to_string()]);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_defaults_to_available_with_quantity_one(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Classic Tuxedo"))
        .await
        .unwrap();

    assert_eq!(product.status_id, ProductStatus::Available.id());
    assert_eq!(product.quantity, 1);
    assert!(!product.is_variant);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn variant_requires_parent_at_the_database(pool: PgPool) {
    let mut orphan = new_product("Orphan Variant");
    orphan.is_variant = Some(true);

    // ck_products_variant_parent rejects a variant with no parent.
    assert!(ProductRepo::create(&pool, &orphan).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn variants_cascade_with_their_parent(pool: PgPool) {
    let parent = ProductRepo::create(&pool, &new_product("Gown")).await.unwrap();

    let mut variant = new_product("Gown 42");
    variant.is_variant = Some(true);
    variant.parent_product_id = Some(parent.id);
    let variant = ProductRepo::create(&pool, &variant).await.unwrap();

    assert_eq!(
        ProductRepo::list_variants(&pool, parent.id)
            .await
            .unwrap()
            .len(),
        1
    );

    assert!(ProductRepo::delete(&pool, parent.id).await.unwrap());
    assert!(ProductRepo::find_by_id(&pool, variant.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_listing_hides_variants_and_filters_by_slug(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Gowns"), "gowns")
        .await
        .unwrap();

    let mut in_category = new_product("Silk Gown");
    in_category.category_id = Some(category.id);
    let parent = ProductRepo::create(&pool, &in_category).await.unwrap();

    let mut variant = new_product("Silk Gown 38");
    variant.is_variant = Some(true);
    variant.parent_product_id = Some(parent.id);
    variant.category_id = Some(category.id);
    ProductRepo::create(&pool, &variant).await.unwrap();

    ProductRepo::create(&pool, &new_product("Uncategorized Suit"))
        .await
        .unwrap();

    let all = ProductRepo::list_catalog(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2, "variants must not appear in the catalog");

    let gowns = ProductRepo::list_catalog(&pool, Some("gowns")).await.unwrap();
    assert_eq!(gowns.len(), 1);
    assert_eq!(gowns[0].name, "Silk Gown");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_partial_update_keeps_other_fields(pool: PgPool) {
    let mut input = new_product("Lace Dress");
    input.quantity = Some(3);
    let product = ProductRepo::create(&pool, &input).await.unwrap();

    let updated = ProductRepo::update(
        &pool,
        product.id,
        &UpdateProduct {
            name: None,
            description: Some("Hand-made lace".to_string()),
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
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Lace Dress");
    assert_eq!(updated.quantity, 3);
    assert_eq!(updated.description.as_deref(), Some("Hand-made lace"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_images_order_primary_first(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Gown")).await.unwrap();

    ProductImageRepo::create(
        &pool,
        product.id,
        &CreateProductImage {
            url: "https://cdn.example.com/gown-side.jpg".to_string(),
            storage_key: None,
            position: Some(1),
            is_primary: None,
        },
    )
    .await
    .unwrap();

    ProductImageRepo::create(
        &pool,
        product.id,
        &CreateProductImage {
            url: "https://cdn.example.com/gown-front.jpg".to_string(),
            storage_key: None,
            position: Some(2),
            is_primary: Some(true),
        },
    )
    .await
    .unwrap();

    let images = ProductImageRepo::list_for_product(&pool, product.id)
        .await
        .unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].is_primary);
    assert!(images[0].url.ends_with("front.jpg"));
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_search_is_case_insensitive(pool: PgPool) {
    CustomerRepo::create(&pool, &new_customer("Ana Beatriz Souza"))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("Carlos Lima"))
        .await
        .unwrap();

    let hits = CustomerRepo::list(&pool, Some("beatriz")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].full_name, "Ana Beatriz Souza");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_update_touches_only_given_fields(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Marina Alves"))
        .await
        .unwrap();

    let updated = CustomerRepo::update(
        &pool,
        customer.id,
        &UpdateCustomer {
            full_name: None,
            phone: Some("+55 11 98888-1111".to_string()),
            email: None,
            document_number: None,
            address: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.full_name, "Marina Alves");
    assert_eq!(updated.phone, "+55 11 98888-1111");
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn color_value_must_be_unique(pool: PgPool) {
    ColorRepo::create(
        &pool,
        &CreateColor {
            name: "Off White".to_string(),
            value: None,
        },
        "off-white",
    )
    .await
    .unwrap();

    let err = ColorRepo::create(
        &pool,
        &CreateColor {
            name: "Off-White".to_string(),
            value: None,
        },
        "off-white",
    )
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_colors_value"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_active_banners_reach_the_storefront(pool: PgPool) {
    let visible = BannerRepo::create(
        &pool,
        &CreateBanner {
            title: "Summer Collection".to_string(),
            image_url: "https://cdn.example.com/summer.jpg".to_string(),
            storage_key: None,
            link_url: None,
            position: Some(1),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let hidden = BannerRepo::create(
        &pool,
        &CreateBanner {
            title: "Old Promo".to_string(),
            image_url: "https://cdn.example.com/old.jpg".to_string(),
            storage_key: None,
            link_url: None,
            position: Some(0),
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    let active = BannerRepo::list_active(&pool).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, visible.id);

    // Reactivate through the admin update path.
    BannerRepo::update(
        &pool,
        hidden.id,
        &UpdateBanner {
            title: None,
            image_url: None,
            storage_key: None,
            link_url: None,
            position: None,
            is_active: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(BannerRepo::list_active(&pool).await.unwrap().len(), 2);
}
