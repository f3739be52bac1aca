//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// POST   /teams        -> create_team
/// DELETE /teams/{id}   -> delete_team
/// POST   /players      -> create_player
/// GET    /users        -> list_users
/// POST   /users        -> create_user
/// POST   /rescan       -> rescan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teams", post(admin::create_team))
        .route("/teams/{id}", delete(admin::delete_team))
        .route("/players", post(admin::create_player))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/rescan", post(admin::rescan))
}
