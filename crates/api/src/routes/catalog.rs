use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog listing routes, merged into `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(catalog::list_teams))
        .route("/players", get(catalog::list_players))
        .route("/recordings", get(catalog::list_recordings))
}
