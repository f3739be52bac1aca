//! Timestamped annotation model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vfe_core::types::{DbId, Timestamp};

/// A row from the `annotations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Annotation {
    pub id: DbId,
    pub recording_id: DbId,
    pub author_id: DbId,
    /// Seconds into the recording (fractional allowed).
    pub timestamp_offset: f64,
    pub content: String,
    pub created_at: Timestamp,
}

/// One element of a replace request: an offset and its note.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationItem {
    pub timestamp_offset: f64,
    pub content: String,
}
