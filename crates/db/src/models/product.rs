//! Product entity models and DTOs, including size-variant hierarchies
//! and catalog images.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A product row from the `products` table.
///
/// `status_id` is a derived cache ("is this product held by an active
/// rental"), corrected by the reconciliation pass; `Maintenance` is a
/// manual override the reconciler never touches. Size variants reference
/// their parent through `parent_product_id` and must point at a
/// non-variant row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    /// Shared SKU prefix across a variant family.
    pub base_sku: Option<String>,
    pub parent_product_id: Option<DbId>,
    pub is_variant: bool,
    pub status_id: StatusId,
    /// Stock count. Informational only: availability treats every product
    /// as a single bookable unit.
    pub quantity: i32,
    pub rental_price_cents: Option<i64>,
    pub category_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub size_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub base_sku: Option<String>,
    pub parent_product_id: Option<DbId>,
    /// Defaults to false.
    pub is_variant: Option<bool>,
    /// Defaults to 1 (Available).
    pub status_id: Option<StatusId>,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    pub rental_price_cents: Option<i64>,
    pub category_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub size_id: Option<DbId>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub base_sku: Option<String>,
    pub parent_product_id: Option<DbId>,
    pub is_variant: Option<bool>,
    pub status_id: Option<StatusId>,
    pub quantity: Option<i32>,
    pub rental_price_cents: Option<i64>,
    pub category_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub size_id: Option<DbId>,
}

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    /// Public URL served to the catalog.
    pub url: String,
    /// Opaque key in the external file store, if managed there.
    pub storage_key: Option<String>,
    pub position: i32,
    pub is_primary: bool,
    pub created_at: Timestamp,
}

/// DTO for attaching an image to a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductImage {
    pub url: String,
    pub storage_key: Option<String>,
    pub position: Option<i32>,
    pub is_primary: Option<bool>,
}

/// A product with its images, as served by the public catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
    /// Size variants folded under their parent (empty for variants).
    pub variants: Vec<Product>,
}
