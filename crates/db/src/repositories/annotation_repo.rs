//! Repository for the `annotations` table.
//!
//! An author's annotations on a recording form one replaceable set: see
//! [`AnnotationRepo::replace`].

use sqlx::SqlitePool;
use vfe_core::annotation::is_blank;
use vfe_core::types::DbId;

use crate::models::annotation::{Annotation, AnnotationItem};

const COLUMNS: &str = "id, recording_id, author_id, timestamp_offset, content, created_at";

/// Provides the replace/append/clear protocol and listings for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Atomically replace the author's whole annotation set for a recording.
    ///
    /// Deletes every existing row for `(recording_id, author_id)` and inserts
    /// one row per item with non-blank content, in item order. The delete and
    /// the inserts share one transaction: any failure rolls all of it back.
    /// Other authors' rows are never touched. Two concurrent calls for the
    /// same pair resolve as last-commit-wins.
    ///
    /// Returns the newly stored rows.
    pub async fn replace(
        pool: &SqlitePool,
        recording_id: DbId,
        author_id: DbId,
        items: &[AnnotationItem],
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM annotations WHERE recording_id = ? AND author_id = ?")
            .bind(recording_id)
            .bind(author_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO annotations (recording_id, author_id, timestamp_offset, content)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let mut stored = Vec::with_capacity(items.len());
        for item in items.iter().filter(|item| !is_blank(&item.content)) {
            let row = sqlx::query_as::<_, Annotation>(&query)
                .bind(recording_id)
                .bind(author_id)
                .bind(item.timestamp_offset)
                .bind(&item.content)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Insert a single annotation without touching existing ones.
    ///
    /// Callers are expected to have rejected blank content already.
    pub async fn append(
        pool: &SqlitePool,
        recording_id: DbId,
        author_id: DbId,
        timestamp_offset: f64,
        content: &str,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (recording_id, author_id, timestamp_offset, content)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(recording_id)
            .bind(author_id)
            .bind(timestamp_offset)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Delete all of an author's annotations on a recording.
    ///
    /// Idempotent: returns the number of rows removed, zero if none existed.
    pub async fn clear(
        pool: &SqlitePool,
        recording_id: DbId,
        author_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM annotations WHERE recording_id = ? AND author_id = ?")
                .bind(recording_id)
                .bind(author_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// List all annotations on a recording, ordered by offset ascending.
    pub async fn list_by_recording(
        pool: &SqlitePool,
        recording_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE recording_id = ?
             ORDER BY timestamp_offset ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(recording_id)
            .fetch_all(pool)
            .await
    }

    /// List one author's annotations on a recording, ordered by offset ascending.
    pub async fn list_by_recording_and_author(
        pool: &SqlitePool,
        recording_id: DbId,
        author_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE recording_id = ? AND author_id = ?
             ORDER BY timestamp_offset ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(recording_id)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }
}
