//! Caller identity extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use watchlog_core::types::DbId;

use crate::state::AppState;

/// The owner a request acts on behalf of.
///
/// Every repository call takes the owner id explicitly. There is no
/// authentication yet, so this always resolves to the configured
/// `OWNER_ID`; swapping in a token-backed lookup only changes this extractor.
///
/// ```ignore
/// async fn my_handler(owner: Owner) -> AppResult<Json<()>> {
///     tracing::info!(owner_id = owner.owner_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub owner_id: DbId,
}

impl FromRequestParts<AppState> for Owner {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Owner {
            owner_id: state.config.owner_id,
        })
    }
}
