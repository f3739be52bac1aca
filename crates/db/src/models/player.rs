use serde::Serialize;
use sqlx::FromRow;
use vfe_core::types::{DbId, Timestamp};

/// A row from the `players` table. Names are unique within a team.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Player {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
