//! Repository for the `teams` table.

use sqlx::SqlitePool;
use vfe_core::types::DbId;

use crate::models::team::Team;

const COLUMNS: &str = "id, name, created_at";

/// Provides create-or-reuse, lookup, listing, and cascade delete for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Return the team with `name`, creating it if absent.
    ///
    /// The boolean is `true` when this call inserted the row. Concurrent
    /// callers racing on the same name all end up with the same row.
    pub async fn find_or_create(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<(Team, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name) VALUES (?)
             ON CONFLICT (name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Team>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(team) => Ok((team, true)),
            None => {
                let team = Self::find_by_name(pool, name)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((team, false))
            }
        }
    }

    /// Find a team by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = ?");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by its exact name.
    pub async fn find_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE name = ?");
        sqlx::query_as::<_, Team>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all teams ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY name ASC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Delete a team. Players, their recordings, and those recordings'
    /// annotations go with it via foreign-key cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
