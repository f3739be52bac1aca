//! Handlers for the `/auth` resource (login, identity echo).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use vfe_core::error::CoreError;
use vfe_core::types::DbId;
use vfe_db::models::user::UserResponse;
use vfe_db::repositories::UserRepo;

use crate::auth::jwt::{generate_access_token, ACCESS_TOKEN_TTL_SECS};
use crate::auth::password::{verify_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// The caller's identity as carried by their token.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and return a 24-hour access token.
/// Unknown usernames and wrong passwords produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(invalid_credentials());
    }

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        verify_dummy(&input.password);
        tracing::info!(username, "Login failed: unknown user");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(
        user.id,
        &user.role,
        &user.username,
        ACCESS_TOKEN_TTL_SECS,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: ACCESS_TOKEN_TTL_SECS,
            user: user.into(),
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth_user: AuthUser) -> Json<DataResponse<MeResponse>> {
    Json(DataResponse {
        data: MeResponse {
            id: auth_user.user_id,
            username: auth_user.username,
            role: auth_user.role,
        },
    })
}
