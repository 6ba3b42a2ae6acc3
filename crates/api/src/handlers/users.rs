//! Admin handlers for staff user management.

use atelier_core::error::CoreError;
use atelier_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use atelier_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use atelier_db::models::user::{CreateUser, UpdateUser, UserPublic};
use atelier_db::repositories::{RefreshTokenRepo, UserRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_role(role: &str) -> AppResult<()> {
    if role == ROLE_ADMIN || role == ROLE_STAFF {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'"
        ))))
    }
}

/// POST /api/v1/admin/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<UserPublic>>)> {
    input.validate()?;
    let role = input.role.as_deref().unwrap_or(ROLE_STAFF);
    validate_role(role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &input.email,
        &password_hash,
        &input.display_name,
        role,
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, created_by = admin.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.into(),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserPublic>>>> {
    let users = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserPublic::from)
        .collect();
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserPublic>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserPublic>>> {
    if let Some(role) = &input.role {
        validate_role(role)?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    // Deactivation kills every live session.
    if input.is_active == Some(false) {
        RefreshTokenRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    Ok(Json(DataResponse { data: user.into() }))
}
