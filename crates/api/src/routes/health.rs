//! `GET /health`: liveness plus a summary of the caller's list.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use watchlog_core::types::DbId;
use watchlog_db::repositories::MediaRepo;

use crate::middleware::owner::Owner;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Owner the server acts as.
    pub owner_id: DbId,
    /// Items recorded for that owner; `null` when the database is down.
    pub media_count: Option<i64>,
}

async fn health(owner: Owner, State(state): State<AppState>) -> Json<HealthResponse> {
    let media_count = match MediaRepo::count(&state.pool, owner.owner_id).await {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = media_count.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        owner_id: owner.owner_id,
        media_count,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
