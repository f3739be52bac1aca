//! Handlers for the `/admin` resource: teams, players, users, re-scan.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use std::path::Path as FsPath;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vfe_core::error::CoreError;
use vfe_core::roles::{validate_role, ROLE_PLAYER};
use vfe_core::storage_layout::{player_vods_dir, team_players_dir, validate_entity_name};
use vfe_core::types::DbId;
use vfe_db::models::player::Player;
use vfe_db::models::team::Team;
use vfe_db::models::user::{CreateUser, UserResponse};
use vfe_db::repositories::{PlayerRepo, TeamRepo, UserRepo};
use vfe_scanner::ScanReport;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/teams`.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Request body for `POST /admin/players`.
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub team_name: String,
    pub name: String,
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(max = 256, message = "password must be at most 256 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[validate(length(max = 128, message = "display_name must be at most 128 characters"))]
    pub display_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 201 when the row was inserted, 200 when an existing one was reused.
fn created_or_ok(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

async fn ensure_dir(dir: &FsPath) -> AppResult<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        AppError::InternalError(format!("Failed to create {}: {e}", dir.display()))
    })
}

// ---------------------------------------------------------------------------
// Teams and players
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/teams
///
/// Create the team (or reuse the existing one with that name) and its
/// `teams/<name>/players` directory under the storage root.
pub async fn create_team(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    let name = validate_entity_name("Team", &input.name)?;

    ensure_dir(&team_players_dir(&state.config.storage_root, name)).await?;
    let (team, created) = TeamRepo::find_or_create(&state.pool, name).await?;

    if created {
        tracing::info!(team_id = team.id, team = %team.name, admin_id = admin.user_id, "Team created");
    }
    Ok((created_or_ok(created), Json(DataResponse { data: team })))
}

/// DELETE /api/v1/admin/teams/{id}
///
/// Removes the team's catalog rows (players, recordings, annotations by
/// cascade). Files on disk are left alone.
pub async fn delete_team(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if !TeamRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Team", id }));
    }
    tracing::info!(team_id = id, admin_id = admin.user_id, "Team deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/players
///
/// Create a player inside an existing team, named by team name, along with
/// its `vods` directory.
pub async fn create_player(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePlayerRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Player>>)> {
    let team_name = validate_entity_name("Team", &input.team_name)?;
    let name = validate_entity_name("Player", &input.name)?;

    let team = TeamRepo::find_by_name(&state.pool, team_name)
        .await?
        .ok_or_else(|| CoreError::NotFoundByName {
            entity: "Team",
            name: team_name.to_string(),
        })?;

    ensure_dir(&player_vods_dir(&state.config.storage_root, &team.name, name)).await?;
    let (player, created) = PlayerRepo::find_or_create(&state.pool, team.id, name).await?;

    if created {
        tracing::info!(
            player_id = player.id,
            team = %team.name,
            player = %player.name,
            admin_id = admin.user_id,
            "Player created"
        );
    }
    Ok((created_or_ok(created), Json(DataResponse { data: player })))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user. Role defaults to `player`; a duplicate username is 409.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username is required".into(),
        )));
    }
    // The password is stored exactly as sent; login compares it untrimmed.
    let password = input.password.as_str();
    if password.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "password is required".into(),
        )));
    }
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let role = validate_role(input.role.as_deref().unwrap_or(ROLE_PLAYER))?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let display_name = input
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            display_name,
            role: role.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, admin_id = admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/rescan
///
/// Run one reconciliation pass now and return its report. Waits for any pass
/// already in progress.
pub async fn rescan(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ScanReport>>> {
    tracing::info!(admin_id = admin.user_id, "Manual re-scan requested");
    let report = state.reconciler.run().await?;
    Ok(Json(DataResponse { data: report }))
}
