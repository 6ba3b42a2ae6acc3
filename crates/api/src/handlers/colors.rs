//! Handlers for the `/colors` reference resource.

use atelier_core::error::CoreError;
use atelier_core::naming::{slugify, validate_slug};
use atelier_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_db::models::color::{Color, CreateColor, UpdateColor};
use atelier_db::repositories::ColorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/colors
pub async fn create(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateColor>,
) -> AppResult<(StatusCode, Json<DataResponse<Color>>)> {
    let value = match &input.value {
        Some(value) => {
            validate_slug(value)?;
            value.clone()
        }
        None => slugify(&input.name),
    };
    validate_slug(&value)?;

    let color = ColorRepo::create(&state.pool, &input, &value).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: color })))
}

/// GET /api/v1/colors
pub async fn list(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Color>>>> {
    let colors = ColorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: colors }))
}

/// PUT /api/v1/colors/{id}
pub async fn update(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateColor>,
) -> AppResult<Json<DataResponse<Color>>> {
    if let Some(value) = &input.value {
        validate_slug(value)?;
    }
    let color = ColorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Color",
            id,
        }))?;
    Ok(Json(DataResponse { data: color }))
}

/// DELETE /api/v1/colors/{id}
pub async fn delete(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ColorRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Color",
            id,
        }))
    }
}
