//! Shared query parameter types for API handlers.

use serde::Deserialize;
use watchlog_core::types::DbId;

use crate::error::AppError;

/// The `?id=` parameter carried by update and delete requests.
///
/// Kept as raw text so that a missing or malformed id produces the JSON
/// error envelope instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    /// Parse the id, naming `action` ("update", "delete") in the error.
    pub fn require(&self, action: &str) -> Result<DbId, AppError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("Media id is required to {action}")))?;

        raw.parse()
            .map_err(|_| AppError::BadRequest(format!("Media id must be an integer, got '{raw}'")))
    }
}
