//! Recording (VOD) model.

use serde::Serialize;
use sqlx::FromRow;
use vfe_core::types::{DbId, Timestamp};

/// A row from the `recordings` table.
///
/// `path` is the reconciliation key: `<root>/teams/<team>/players/<player>/vods/<file>`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recording {
    pub id: DbId,
    pub player_id: DbId,
    pub path: String,
    pub title: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a recording row during reconciliation.
#[derive(Debug, Clone)]
pub struct CreateRecording {
    pub player_id: DbId,
    pub path: String,
    pub title: Option<String>,
}
