//! Repository for the `recordings` table.

use sqlx::SqlitePool;
use vfe_core::types::DbId;

use crate::models::recording::{CreateRecording, Recording};

const COLUMNS: &str = "id, player_id, path, title, created_at";

/// Provides create-or-reuse by path, listing, and deletion for recordings.
pub struct RecordingRepo;

impl RecordingRepo {
    /// Return the recording stored at `input.path`, creating it if absent.
    ///
    /// The boolean is `true` when this call inserted the row. An existing row
    /// is returned unchanged even if `player_id` or `title` differ.
    pub async fn find_or_create(
        pool: &SqlitePool,
        input: &CreateRecording,
    ) -> Result<(Recording, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO recordings (player_id, path, title) VALUES (?, ?, ?)
             ON CONFLICT (path) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Recording>(&query)
            .bind(input.player_id)
            .bind(&input.path)
            .bind(&input.title)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(recording) => Ok((recording, true)),
            None => {
                let recording = Self::find_by_path(pool, &input.path)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((recording, false))
            }
        }
    }

    /// Find a recording by its ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Recording>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recordings WHERE id = ?");
        sqlx::query_as::<_, Recording>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recording by its storage path.
    pub async fn find_by_path(
        pool: &SqlitePool,
        path: &str,
    ) -> Result<Option<Recording>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recordings WHERE path = ?");
        sqlx::query_as::<_, Recording>(&query)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a recording exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recordings WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0 > 0)
    }

    /// List all recordings, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Recording>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recordings ORDER BY id DESC");
        sqlx::query_as::<_, Recording>(&query).fetch_all(pool).await
    }

    /// List a player's recordings, newest first.
    pub async fn list_by_player(
        pool: &SqlitePool,
        player_id: DbId,
    ) -> Result<Vec<Recording>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM recordings WHERE player_id = ? ORDER BY id DESC");
        sqlx::query_as::<_, Recording>(&query)
            .bind(player_id)
            .fetch_all(pool)
            .await
    }

    /// List `(id, path)` for every recording in the catalog.
    pub async fn list_paths(pool: &SqlitePool) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as("SELECT id, path FROM recordings ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Delete a recording by ID (cascades to its annotations).
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recordings WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a recording by storage path (cascades to its annotations).
    pub async fn delete_by_path(pool: &SqlitePool, path: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recordings WHERE path = ?")
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
