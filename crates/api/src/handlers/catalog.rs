//! Public storefront handlers: no authentication, read-only.

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;

use atelier_db::models::banner::Banner;
use atelier_db::models::category::Category;
use atelier_db::models::product::{Product, ProductImage, ProductWithImages};
use atelier_db::repositories::{BannerRepo, CategoryRepo, ProductImageRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    /// Category slug filter (the `?category=` query-string from the
    /// storefront).
    pub category: Option<String>,
}

/// GET /api/v1/catalog/products?category=<slug>
///
/// Non-variant products with images, variants folded under each parent.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<DataResponse<Vec<ProductWithImages>>>> {
    let products = ProductRepo::list_catalog(&state.pool, params.category.as_deref()).await?;
    let parent_ids: Vec<DbId> = products.iter().map(|p| p.id).collect();

    let mut images = group_by_product(
        ProductImageRepo::list_for_products(&state.pool, &parent_ids).await?,
    );
    let mut variants = group_variants(
        ProductRepo::list_variants_for_parents(&state.pool, &parent_ids).await?,
    );

    let data = products
        .into_iter()
        .map(|product| ProductWithImages {
            images: images.remove(&product.id).unwrap_or_default(),
            variants: variants.remove(&product.id).unwrap_or_default(),
            product,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/catalog/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductWithImages>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| !p.is_variant)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let images = ProductImageRepo::list_for_product(&state.pool, id).await?;
    let variants = ProductRepo::list_variants(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ProductWithImages {
            product,
            images,
            variants,
        },
    }))
}

/// GET /api/v1/catalog/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/catalog/banners
pub async fn list_banners(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Banner>>>> {
    let banners = BannerRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: banners }))
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

fn group_by_product(images: Vec<ProductImage>) -> HashMap<DbId, Vec<ProductImage>> {
    let mut grouped: HashMap<DbId, Vec<ProductImage>> = HashMap::new();
    for image in images {
        grouped.entry(image.product_id).or_default().push(image);
    }
    grouped
}

fn group_variants(variants: Vec<Product>) -> HashMap<DbId, Vec<Product>> {
    let mut grouped: HashMap<DbId, Vec<Product>> = HashMap::new();
    for variant in variants {
        if let Some(parent_id) = variant.parent_product_id {
            grouped.entry(parent_id).or_default().push(variant);
        }
    }
    grouped
}
