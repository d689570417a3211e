//! Repository for the `media_items` table.
//!
//! Every query is scoped to an owner. A row owned by someone else behaves
//! exactly like a missing row.

use sqlx::PgPool;
use watchlog_core::types::DbId;

use crate::models::media::{MediaFields, MediaItem, MediaRow};

/// Column list for `media_items` queries.
const COLUMNS: &str = "\
    id, owner_id, title, kind, status, rating, \
    completion_date, cover_url, created_at";

/// Provides data access for media items.
pub struct MediaRepo;

impl MediaRepo {
    /// List every item belonging to `owner_id`, most recent first.
    pub async fn list(pool: &PgPool, owner_id: DbId) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items \
             WHERE owner_id = $1 \
             ORDER BY id DESC"
        );
        let rows = sqlx::query_as::<_, MediaRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(MediaItem::from).collect())
    }

    /// Number of items belonging to `owner_id`.
    pub async fn count(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_items WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find one item by id for `owner_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE id = $1 AND owner_id = $2");
        let row = sqlx::query_as::<_, MediaRow>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(MediaItem::from))
    }

    /// Insert a new item and return the stored row, including its new id.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        fields: &MediaFields,
    ) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items \
                 (owner_id, title, kind, status, rating, completion_date, cover_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MediaRow>(&query)
            .bind(owner_id)
            .bind(&fields.title)
            .bind(fields.kind.as_str())
            .bind(fields.status.as_str())
            .bind(fields.rating)
            .bind(fields.completion_date)
            .bind(&fields.cover_url)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Replace every mutable field of an item.
    ///
    /// Not a patch: `None` fields are written as NULL. Returns `None` if no
    /// row matches both `id` and `owner_id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        fields: &MediaFields,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE media_items SET \
                 title = $3, \
                 kind = $4, \
                 status = $5, \
                 rating = $6, \
                 completion_date = $7, \
                 cover_url = $8 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MediaRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&fields.title)
            .bind(fields.kind.as_str())
            .bind(fields.status.as_str())
            .bind(fields.rating)
            .bind(fields.completion_date)
            .bind(&fields.cover_url)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(MediaItem::from))
    }

    /// Delete an item.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
