pub mod admin;
pub mod annotation;
pub mod auth;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         identity echo
///
/// /teams                                           list teams
/// /players?team_id=                                list players of a team
/// /recordings[?player_id=]                         list recordings, newest first
///
/// /annotations?recording_id=[&author_id=]          list (GET), clear own (DELETE)
/// /annotations                                     replace own (PUT), append (POST)
///
/// /admin/teams                                     create-or-reuse (admin only)
/// /admin/teams/{id}                                delete (admin only)
/// /admin/players                                   create-or-reuse (admin only)
/// /admin/users                                     list, create (admin only)
/// /admin/rescan                                    reconcile now (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(catalog::router())
        .merge(annotation::router())
}
