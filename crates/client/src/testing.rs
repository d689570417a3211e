//! In-memory [`MediaService`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use watchlog_core::error::CoreError;
use watchlog_core::media::{MediaKind, WatchStatus};
use watchlog_core::model::{MediaInput, MediaItem};
use watchlog_core::types::DbId;

use crate::api::MediaService;
use crate::error::ClientError;

const OWNER_ID: DbId = 1;

/// A stored item with the given id and title and default kind/status.
pub fn item(id: DbId, title: &str) -> MediaItem {
    MediaItem {
        id,
        owner_id: OWNER_ID,
        title: title.to_string(),
        kind: MediaKind::Movie,
        status: WatchStatus::WantToWatch,
        rating: None,
        completion_date: None,
        cover_url: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
struct State {
    items: Vec<MediaItem>,
    next_id: DbId,
    fail_next: Option<String>,
    calls: usize,
}

/// Behaves like the server: validates input, assigns ids, 404s unknown ids.
#[derive(Default)]
pub struct FakeService {
    state: Mutex<State>,
}

impl FakeService {
    pub fn with_items(items: Vec<MediaItem>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(State {
                items,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Make the next call fail with a 500 carrying `message`.
    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    /// Number of calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn stored(&self) -> Vec<MediaItem> {
        self.state.lock().unwrap().items.clone()
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        match state.fail_next.take() {
            Some(message) => Err(ClientError::Server {
                status: 500,
                message,
            }),
            None => Ok(state),
        }
    }
}

fn rejected(err: CoreError) -> ClientError {
    let message = match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    };
    ClientError::Server {
        status: 400,
        message,
    }
}

fn not_found(id: DbId) -> ClientError {
    ClientError::Server {
        status: 404,
        message: format!("Media item with id {id} not found"),
    }
}

#[async_trait]
impl MediaService for FakeService {
    async fn list(&self) -> Result<Vec<MediaItem>, ClientError> {
        let state = self.enter()?;
        Ok(state.items.clone())
    }

    async fn create(&self, input: &MediaInput) -> Result<MediaItem, ClientError> {
        let mut state = self.enter()?;
        let fields = input.validate().map_err(rejected)?;

        state.next_id += 1;
        let created = MediaItem {
            id: state.next_id,
            owner_id: OWNER_ID,
            title: fields.title,
            kind: fields.kind,
            status: fields.status,
            rating: fields.rating,
            completion_date: fields.completion_date,
            cover_url: fields.cover_url,
            created_at: Utc::now(),
        };
        state.items.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, input: &MediaInput) -> Result<MediaItem, ClientError> {
        let mut state = self.enter()?;
        let fields = input.validate().map_err(rejected)?;

        let stored = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found(id))?;
        stored.title = fields.title;
        stored.kind = fields.kind;
        stored.status = fields.status;
        stored.rating = fields.rating;
        stored.completion_date = fields.completion_date;
        stored.cover_url = fields.cover_url;
        Ok(stored.clone())
    }

    async fn delete(&self, id: DbId) -> Result<DbId, ClientError> {
        let mut state = self.enter()?;
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(not_found(id));
        }
        Ok(id)
    }
}
