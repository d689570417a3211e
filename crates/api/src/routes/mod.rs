pub mod health;
pub mod media;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /media              list (GET), create (POST)
/// /media?id={id}      update (PUT), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(media::router())
}
