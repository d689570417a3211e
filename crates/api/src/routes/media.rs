//! Route definitions for the media resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Media routes.
///
/// ```text
/// GET    /media          -> list
/// POST   /media          -> create
/// PUT    /media?id={id}  -> update
/// DELETE /media?id={id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/media",
        get(media::list)
            .post(media::create)
            .put(media::update)
            .delete(media::delete),
    )
}
