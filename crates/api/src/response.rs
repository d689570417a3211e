//! Response envelope types for the media endpoints.
//!
//! Clients rely on these exact key names: `list` for the collection,
//! `message` + `item` after a write, `message` + `deletedId` after a delete.

use serde::Serialize;
use watchlog_core::types::DbId;

/// `{ "list": [...] }` envelope returned by collection reads.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub list: Vec<T>,
}

/// `{ "message": ..., "item": ... }` envelope returned by create and update.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T: Serialize> {
    pub message: String,
    pub item: T,
}

/// `{ "message": ..., "deletedId": ... }` envelope returned by delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    #[serde(rename = "deletedId")]
    pub deleted_id: DbId,
}
