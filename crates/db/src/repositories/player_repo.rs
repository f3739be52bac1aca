//! Repository for the `players` table.

use sqlx::SqlitePool;
use vfe_core::types::DbId;

use crate::models::player::Player;

const COLUMNS: &str = "id, team_id, name, created_at";

/// Provides create-or-reuse, lookup, listing, and cascade delete for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Return the player named `name` in `team_id`, creating it if absent.
    ///
    /// The boolean is `true` when this call inserted the row.
    pub async fn find_or_create(
        pool: &SqlitePool,
        team_id: DbId,
        name: &str,
    ) -> Result<(Player, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO players (team_id, name) VALUES (?, ?)
             ON CONFLICT (team_id, name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Player>(&query)
            .bind(team_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(player) => Ok((player, true)),
            None => {
                let player = Self::find_by_team_and_name(pool, team_id, name)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((player, false))
            }
        }
    }

    /// Find a player by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE id = ?");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a player by (team, name).
    pub async fn find_by_team_and_name(
        pool: &SqlitePool,
        team_id: DbId,
        name: &str,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE team_id = ? AND name = ?");
        sqlx::query_as::<_, Player>(&query)
            .bind(team_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all players of a team ordered by name.
    pub async fn list_by_team(
        pool: &SqlitePool,
        team_id: DbId,
    ) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE team_id = ? ORDER BY name ASC");
        sqlx::query_as::<_, Player>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a player (cascades to recordings and annotations).
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
