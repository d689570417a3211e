//! The media item as it travels over the wire, and its input DTO.
//!
//! Storage-specific row mapping lives in `watchlog-db`; these types carry no
//! database coupling so the client can share them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::{normalize_text, validate_rating, validate_required, MediaKind, WatchStatus};
use crate::serde_helpers::lenient_option;
use crate::types::{Date, DbId, Timestamp};

/// A stored media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub kind: MediaKind,
    pub status: WatchStatus,
    pub rating: Option<i16>,
    pub completion_date: Option<Date>,
    pub cover_url: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for creating or replacing a media item.
///
/// Every field is optional at the wire level so that missing required
/// fields surface as a validation error naming them, not a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInput {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub rating: Option<i16>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub completion_date: Option<Date>,
    pub cover_url: Option<String>,
}

/// The full set of mutable fields after validation.
///
/// Written wholesale by both insert and update; `None` clears a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFields {
    pub title: String,
    pub kind: MediaKind,
    pub status: WatchStatus,
    pub rating: Option<i16>,
    pub completion_date: Option<Date>,
    pub cover_url: Option<String>,
}

impl MediaInput {
    /// Check required fields and the rating rule, normalizing text input.
    pub fn validate(&self) -> Result<MediaFields, CoreError> {
        let title = normalize_text(self.title.as_deref());
        let kind = normalize_text(self.kind.as_deref());
        let status = normalize_text(self.status.as_deref());

        validate_required(title.as_deref(), kind.as_deref(), status.as_deref())?;

        let (Some(title), Some(kind), Some(status)) = (title, kind, status) else {
            return Err(CoreError::Internal(
                "required fields missing after validation".into(),
            ));
        };

        let status = WatchStatus::from(status);
        validate_rating(self.rating, &status)?;

        Ok(MediaFields {
            title,
            kind: MediaKind::from(kind),
            status,
            rating: self.rating,
            completion_date: self.completion_date,
            cover_url: normalize_text(self.cover_url.as_deref()),
        })
    }
}

impl From<&MediaItem> for MediaInput {
    fn from(item: &MediaItem) -> Self {
        Self {
            title: Some(item.title.clone()),
            kind: Some(item.kind.to_string()),
            status: Some(item.status.to_string()),
            rating: item.rating,
            completion_date: item.completion_date,
            cover_url: item.cover_url.clone(),
        }
    }
}
