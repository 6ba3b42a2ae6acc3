//! Handlers for the `/sizes` reference resource.

use atelier_core::error::CoreError;
use atelier_core::naming::{slugify, validate_slug};
use atelier_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_db::models::size::{CreateSize, Size, UpdateSize};
use atelier_db::repositories::SizeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sizes
pub async fn create(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateSize>,
) -> AppResult<(StatusCode, Json<DataResponse<Size>>)> {
    let value = match &input.value {
        Some(value) => {
            validate_slug(value)?;
            value.clone()
        }
        None => slugify(&input.name),
    };
    validate_slug(&value)?;

    let size = SizeRepo::create(&state.pool, &input, &value).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: size })))
}

/// GET /api/v1/sizes
pub async fn list(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Size>>>> {
    let sizes = SizeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sizes }))
}

/// PUT /api/v1/sizes/{id}
pub async fn update(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSize>,
) -> AppResult<Json<DataResponse<Size>>> {
    if let Some(value) = &input.value {
        validate_slug(value)?;
    }
    let size = SizeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Size",
            id,
        }))?;
    Ok(Json(DataResponse { data: size }))
}

/// DELETE /api/v1/sizes/{id}
pub async fn delete(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SizeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Size",
            id,
        }))
    }
}
