//! Row mapping for the `media_items` table.

use sqlx::FromRow;
use watchlog_core::media::{MediaKind, WatchStatus};
use watchlog_core::types::{Date, DbId, Timestamp};

pub use watchlog_core::model::{MediaFields, MediaInput, MediaItem};

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct MediaRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub kind: MediaKind,
    #[sqlx(try_from = "String")]
    pub status: WatchStatus,
    pub rating: Option<i16>,
    pub completion_date: Option<Date>,
    pub cover_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<MediaRow> for MediaItem {
    fn from(row: MediaRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            kind: row.kind,
            status: row.status,
            rating: row.rating,
            completion_date: row.completion_date,
            cover_url: row.cover_url,
            created_at: row.created_at,
        }
    }
}
