//! Handlers for the `/products` resource, including catalog images and
//! the status reconciliation endpoints.

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use atelier_db::models::product::{
    CreateProduct, CreateProductImage, Product, ProductImage, UpdateProduct,
};
use atelier_db::models::status::StatusId;
use atelier_db::repositories::{ProductImageRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// A variant must point at an existing, non-variant parent.
async fn validate_variant_parent(
    pool: &sqlx::PgPool,
    is_variant: bool,
    parent_product_id: Option<DbId>,
) -> AppResult<()> {
    match (is_variant, parent_product_id) {
        (true, None) => Err(AppError::Core(CoreError::Validation(
            "A variant requires parent_product_id".into(),
        ))),
        (false, Some(_)) => Err(AppError::Core(CoreError::Validation(
            "Only variants may set parent_product_id".into(),
        ))),
        (true, Some(parent_id)) => {
            let parent = ProductRepo::find_by_id(pool, parent_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Product",
                    id: parent_id,
                }))?;
            if parent.is_variant {
                return Err(AppError::Core(CoreError::Validation(
                    "parent_product_id must reference a non-variant product".into(),
                )));
            }
            Ok(())
        }
        (false, None) => Ok(()),
    }
}

async fn find_product(state: &AppState, id: DbId) -> AppResult<Product> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/products
pub async fn create(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    validate_variant_parent(
        &state.pool,
        input.is_variant.unwrap_or(false),
        input.parent_product_id,
    )
    .await?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, name = %product.name, user_id = auth.user_id, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products
pub async fn list(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = find_product(&state, id).await?;
    Ok(Json(DataResponse { data: product }))
}

/// GET /api/v1/products/{id}/variants
pub async fn list_variants(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    find_product(&state, id).await?;
    let variants = ProductRepo::list_variants(&state.pool, id).await?;
    Ok(Json(DataResponse { data: variants }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    let existing = find_product(&state, id).await?;

    // Validate the hierarchy the row would end up with.
    let is_variant = input.is_variant.unwrap_or(existing.is_variant);
    let parent_id = input.parent_product_id.or(existing.parent_product_id);
    validate_variant_parent(&state.pool, is_variant, parent_id).await?;
    if parent_id == Some(id) {
        return Err(AppError::Core(CoreError::Validation(
            "A product cannot be its own parent".into(),
        )));
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(product_id = id, user_id = auth.user_id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{id}/images
pub async fn list_images(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProductImage>>>> {
    find_product(&state, id).await?;
    let images = ProductImageRepo::list_for_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/products/{id}/images
pub async fn add_image(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProductImage>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductImage>>)> {
    find_product(&state, id).await?;
    let image = ProductImageRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// DELETE /api/v1/products/{id}/images/{image_id}
pub async fn delete_image(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path((id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ProductImageRepo::delete(&state.pool, id, image_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductImage",
            id: image_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Outcome of the full reconciliation pass.
#[derive(Debug, Serialize)]
pub struct ReconcileAllResponse {
    /// Number of products whose stored status had drifted and was
    /// corrected.
    pub corrected: u64,
}

/// Outcome of a single-product reconciliation.
#[derive(Debug, Serialize)]
pub struct ReconcileOneResponse {
    /// The corrected status, or `None` when the stored value was already
    /// right (or under manual `maintenance` override).
    pub corrected_status_id: Option<StatusId>,
}

/// POST /api/v1/products/reconcile-statuses
///
/// One idempotent pass over every product: a single conditional bulk
/// update, not a per-product loop.
pub async fn reconcile_all(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReconcileAllResponse>>> {
    let corrected = ProductRepo::reconcile_statuses(&state.pool).await?;
    tracing::info!(corrected, user_id = auth.user_id, "Product status reconciliation run");
    Ok(Json(DataResponse {
        data: ReconcileAllResponse { corrected },
    }))
}

/// POST /api/v1/products/{id}/reconcile-status
pub async fn reconcile_one(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReconcileOneResponse>>> {
    find_product(&state, id).await?;
    let corrected_status_id = ProductRepo::reconcile_status(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ReconcileOneResponse {
            corrected_status_id,
        },
    }))
}
