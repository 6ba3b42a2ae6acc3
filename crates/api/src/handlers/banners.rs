//! Handlers for the `/banners` resource (admin side; the storefront
//! reads active banners through the catalog).

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use atelier_db::models::banner::{Banner, CreateBanner, UpdateBanner};
use atelier_db::repositories::BannerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/banners
pub async fn create(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateBanner>,
) -> AppResult<(StatusCode, Json<DataResponse<Banner>>)> {
    input.validate()?;
    let banner = BannerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: banner })))
}

/// GET /api/v1/banners
pub async fn list(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Banner>>>> {
    let banners = BannerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: banners }))
}

/// GET /api/v1/banners/{id}
pub async fn get_by_id(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Banner>>> {
    let banner = BannerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Banner",
            id,
        }))?;
    Ok(Json(DataResponse { data: banner }))
}

/// PUT /api/v1/banners/{id}
pub async fn update(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBanner>,
) -> AppResult<Json<DataResponse<Banner>>> {
    input.validate()?;
    let banner = BannerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Banner",
            id,
        }))?;
    Ok(Json(DataResponse { data: banner }))
}

/// DELETE /api/v1/banners/{id}
pub async fn delete(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BannerRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Banner",
            id,
        }))
    }
}
