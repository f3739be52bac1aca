use std::sync::Arc;

use vfe_scanner::Reconciler;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vfe_db::DbPool,
    /// Server configuration (JWT secret, storage root).
    pub config: Arc<ServerConfig>,
    /// The storage reconciler shared with startup and the background re-scan.
    pub reconciler: Arc<Reconciler>,
}
