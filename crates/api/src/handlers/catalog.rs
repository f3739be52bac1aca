//! Read-only catalog listings: teams, players, recordings.
//!
//! Every listing returns an empty array, never an error, when nothing matches.

use axum::extract::State;
use axum::Json;
use vfe_db::models::player::Player;
use vfe_db::models::recording::Recording;
use vfe_db::models::team::Team;
use vfe_db::repositories::{PlayerRepo, RecordingRepo, TeamRepo};

use crate::error::AppResult;
use crate::extract::QueryParams;
use crate::middleware::rbac::RequireAuth;
use crate::query::{require, PlayerFilter, TeamFilter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/teams
pub async fn list_teams(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Team>>>> {
    let teams = TeamRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/players?team_id=
pub async fn list_players(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TeamFilter>,
) -> AppResult<Json<DataResponse<Vec<Player>>>> {
    let team_id = require(params.team_id, "team_id")?;
    let players = PlayerRepo::list_by_team(&state.pool, team_id).await?;
    Ok(Json(DataResponse { data: players }))
}

/// GET /api/v1/recordings[?player_id=]
///
/// Newest first.
pub async fn list_recordings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PlayerFilter>,
) -> AppResult<Json<DataResponse<Vec<Recording>>>> {
    let recordings = match params.player_id {
        Some(player_id) => RecordingRepo::list_by_player(&state.pool, player_id).await?,
        None => RecordingRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: recordings }))
}
