use serde::Serialize;
use sqlx::FromRow;
use vfe_core::types::{DbId, Timestamp};

/// A row from the `teams` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
