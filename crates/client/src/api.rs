//! HTTP access to the `/media` endpoints.
//!
//! [`MediaService`] is the seam the store and views talk to;
//! [`HttpMediaService`] implements it over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use watchlog_core::model::{MediaInput, MediaItem};
use watchlog_core::types::DbId;

use crate::error::ClientError;

/// Timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The four media operations, as seen from the client.
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Fetch every item for the current owner.
    async fn list(&self) -> Result<Vec<MediaItem>, ClientError>;

    /// Create an item and return the stored row.
    async fn create(&self, input: &MediaInput) -> Result<MediaItem, ClientError>;

    /// Replace an item's fields and return the stored row.
    async fn update(&self, id: DbId, input: &MediaInput) -> Result<MediaItem, ClientError>;

    /// Delete an item and return the id the server confirmed.
    async fn delete(&self, id: DbId) -> Result<DbId, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    list: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    item: MediaItem,
}

#[derive(Debug, Deserialize)]
struct DeletedEnvelope {
    #[serde(rename = "deletedId")]
    deleted_id: DbId,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// [`MediaService`] backed by the HTTP API.
#[derive(Clone)]
pub struct HttpMediaService {
    client: Client,
    media_url: String,
}

impl HttpMediaService {
    /// Build a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("watchlog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            media_url: format!("{}/media", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl MediaService for HttpMediaService {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<MediaItem>, ClientError> {
        let response = self.client.get(&self.media_url).send().await?;
        let envelope: ListEnvelope = decode(response).await?;
        debug!(count = envelope.list.len(), "Fetched media list");
        Ok(envelope.list)
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: &MediaInput) -> Result<MediaItem, ClientError> {
        let response = self.client.post(&self.media_url).json(input).send().await?;
        let envelope: ItemEnvelope = decode(response).await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: DbId, input: &MediaInput) -> Result<MediaItem, ClientError> {
        let response = self
            .client
            .put(&self.media_url)
            .query(&[("id", id)])
            .json(input)
            .send()
            .await?;
        let envelope: ItemEnvelope = decode(response).await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: DbId) -> Result<DbId, ClientError> {
        let response = self
            .client
            .delete(&self.media_url)
            .query(&[("id", id)])
            .send()
            .await?;
        let envelope: DeletedEnvelope = decode(response).await?;
        Ok(envelope.deleted_id)
    }
}

/// Parse a success body, or turn an error envelope into [`ClientError::Server`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.error,
        Err(_) => format!("Request failed with status {status}"),
    };
    warn!(status = status.as_u16(), %message, "Server rejected request");

    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}
