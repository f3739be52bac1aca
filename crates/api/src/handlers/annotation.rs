//! Handlers for `/annotations`: listing plus the replace/append/clear
//! protocol.
//!
//! Writes always target the caller's own annotations; the author is taken
//! from the token, never from the request body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vfe_core::annotation::{validate_append, validate_replace};
use vfe_core::error::CoreError;
use vfe_core::types::DbId;
use vfe_db::models::annotation::{Annotation, AnnotationItem};
use vfe_db::repositories::{AnnotationRepo, RecordingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::query::{require, AnnotationFilter};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /annotations`.
#[derive(Debug, Deserialize)]
pub struct ReplaceAnnotationsRequest {
    pub recording_id: DbId,
    #[serde(default)]
    pub items: Vec<AnnotationItem>,
}

/// Request body for `POST /annotations`.
#[derive(Debug, Deserialize)]
pub struct AppendAnnotationRequest {
    pub recording_id: DbId,
    pub timestamp_offset: f64,
    pub content: String,
}

/// Response for `DELETE /annotations`.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_recording_exists(state: &AppState, recording_id: DbId) -> AppResult<()> {
    if RecordingRepo::exists(&state.pool, recording_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Recording",
            id: recording_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/annotations?recording_id=[&author_id=]
///
/// Ordered by offset ascending.
pub async fn list_annotations(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AnnotationFilter>,
) -> AppResult<Json<DataResponse<Vec<Annotation>>>> {
    let recording_id = require(params.recording_id, "recording_id")?;
    let annotations = match params.author_id {
        Some(author_id) => {
            AnnotationRepo::list_by_recording_and_author(&state.pool, recording_id, author_id)
                .await?
        }
        None => AnnotationRepo::list_by_recording(&state.pool, recording_id).await?,
    };
    Ok(Json(DataResponse { data: annotations }))
}

/// PUT /api/v1/annotations
///
/// Replace the caller's whole annotation set on a recording. Items with
/// blank content are dropped; an empty list clears the set.
pub async fn replace_annotations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ReplaceAnnotationsRequest>,
) -> AppResult<Json<DataResponse<Vec<Annotation>>>> {
    validate_replace(
        input
            .items
            .iter()
            .map(|item| (item.timestamp_offset, item.content.as_str())),
    )?;
    ensure_recording_exists(&state, input.recording_id).await?;

    let stored = AnnotationRepo::replace(
        &state.pool,
        input.recording_id,
        auth_user.user_id,
        &input.items,
    )
    .await?;

    tracing::info!(
        recording_id = input.recording_id,
        author_id = auth_user.user_id,
        submitted = input.items.len(),
        stored = stored.len(),
        "Annotations replaced"
    );

    Ok(Json(DataResponse { data: stored }))
}

/// POST /api/v1/annotations
///
/// Add one annotation without touching the caller's existing ones.
pub async fn append_annotation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AppendAnnotationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Annotation>>)> {
    validate_append(input.timestamp_offset, &input.content)?;
    ensure_recording_exists(&state, input.recording_id).await?;

    let annotation = AnnotationRepo::append(
        &state.pool,
        input.recording_id,
        auth_user.user_id,
        input.timestamp_offset,
        &input.content,
    )
    .await?;

    tracing::debug!(
        annotation_id = annotation.id,
        recording_id = input.recording_id,
        author_id = auth_user.user_id,
        "Annotation appended"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: annotation })))
}

/// DELETE /api/v1/annotations?recording_id=
///
/// Remove all of the caller's annotations on a recording. Idempotent.
pub async fn clear_annotations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AnnotationFilter>,
) -> AppResult<Json<DataResponse<ClearResponse>>> {
    let recording_id = require(params.recording_id, "recording_id")?;
    ensure_recording_exists(&state, recording_id).await?;

    let deleted = AnnotationRepo::clear(&state.pool, recording_id, auth_user.user_id).await?;
    tracing::info!(recording_id, author_id = auth_user.user_id, deleted, "Annotations cleared");

    Ok(Json(DataResponse {
        data: ClearResponse { deleted },
    }))
}
