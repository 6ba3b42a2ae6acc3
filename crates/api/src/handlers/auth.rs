//! Authentication handlers: login, token refresh, logout.

use atelier_core::error::CoreError;
use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use atelier_db::models::user::{User, UserPublic};
use atelier_db::repositories::{RefreshTokenRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserPublic,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        return Err(invalid_credentials());
    }

    let response = issue_tokens(&state, user).await?;
    tracing::info!(user_id = response.user.id, "User logged in");
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented token is revoked and a new
/// pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let hash = hash_refresh_token(&input.refresh_token);
    let stored = RefreshTokenRepo::find_valid(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, stored.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    RefreshTokenRepo::revoke(&state.pool, &hash).await?;
    let response = issue_tokens(&state, user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<LogoutRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let hash = hash_refresh_token(&input.refresh_token);
    RefreshTokenRepo::revoke(&state.pool, &hash).await?;
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(Json(DataResponse {
        data: serde_json::json!({ "logged_out": true }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    // Same message for unknown email and wrong password.
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Issue an access/refresh token pair and persist the refresh hash.
async fn issue_tokens(state: &AppState, user: User) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    RefreshTokenRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        user: user.into(),
    })
}
