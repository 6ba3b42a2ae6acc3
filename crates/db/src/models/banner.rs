//! Site banner entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A banner row from the `banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Banner {
    pub id: DbId,
    pub title: String,
    /// Public URL served to the storefront.
    pub image_url: String,
    /// Opaque key in the external file store, if managed there.
    pub storage_key: Option<String>,
    pub link_url: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new banner.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBanner {
    pub title: String,
    #[validate(url)]
    pub image_url: String,
    pub storage_key: Option<String>,
    #[validate(url)]
    pub link_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing banner. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBanner {
    pub title: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub storage_key: Option<String>,
    #[validate(url)]
    pub link_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}
