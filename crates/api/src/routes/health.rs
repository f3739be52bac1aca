//! `GET /health`: liveness plus the two things the service cannot run
//! without, the catalog database and the storage root.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// The storage root exists and is a directory.
    pub storage_healthy: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vfe_db::health_check(&state.pool).await.is_ok();
    let storage_healthy = tokio::fs::metadata(state.reconciler.root())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !db_healthy || !storage_healthy {
        tracing::warn!(db_healthy, storage_healthy, "Health check degraded");
    }

    Json(HealthResponse {
        status: if db_healthy && storage_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
