//! Client-side view state for the media list.
//!
//! [`MediaStore`] is a local projection of the server's rows. It is filled
//! once by [`MediaStore::load`] and afterwards changed only by applying the
//! item (or id) the server returned for a confirmed mutation. It never
//! re-fetches on its own.

use watchlog_core::model::MediaItem;
use watchlog_core::types::DbId;

use crate::api::MediaService;
use crate::error::ClientError;

/// The media list plus the item currently being edited.
///
/// Invariants:
/// - `items` never holds two elements with the same id.
/// - `editing`, when set, names an id present in `items`.
#[derive(Debug, Clone, Default)]
pub struct MediaStore {
    items: Vec<MediaItem>,
    editing: Option<MediaItem>,
    loading: bool,
    error: Option<String>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in display order (newest first after a load).
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn editing(&self) -> Option<&MediaItem> {
        self.editing.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last load failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: DbId) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Fetch the full list and replace local state with it.
    pub async fn load(&mut self, service: &dyn MediaService) {
        self.begin_load();
        let result = service.list().await;
        self.finish_load(result);
    }

    /// Mark a load as in flight and clear the previous error.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a load started with [`begin_load`](Self::begin_load).
    ///
    /// On success the list is replaced wholesale and sorted by id
    /// descending. On failure the current items are kept and the message is
    /// recorded for display.
    pub fn finish_load(&mut self, result: Result<Vec<MediaItem>, ClientError>) {
        self.loading = false;
        match result {
            Ok(mut items) => {
                items.sort_by(|a, b| b.id.cmp(&a.id));
                items.dedup_by_key(|item| item.id);
                tracing::debug!(count = items.len(), "Media list loaded");
                self.items = items;
                if let Some(editing) = &self.editing {
                    if self.find(editing.id).is_none() {
                        self.editing = None;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load media list");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Put a newly created item at the head of the list.
    pub fn after_create(&mut self, item: MediaItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
    }

    /// Drop a deleted item, and stop editing it if it was being edited.
    pub fn after_delete(&mut self, id: DbId) {
        self.items.retain(|item| item.id != id);
        if self.editing.as_ref().is_some_and(|item| item.id == id) {
            self.editing = None;
        }
    }

    /// Start editing `item`. No network call.
    ///
    /// Returns `false` (and changes nothing) if the item is not in the list.
    pub fn begin_edit(&mut self, item: MediaItem) -> bool {
        if self.find(item.id).is_none() {
            return false;
        }
        self.editing = Some(item);
        true
    }

    /// Swap in the server's version of an updated item and stop editing.
    pub fn after_update(&mut self, item: MediaItem) {
        self.editing = None;
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.id == item.id) {
            *slot = item;
        }
    }

    /// Stop editing without saving. No network call.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
