//! Handlers for the `/media` resource.
//!
//! Each handler runs exactly one statement, scoped to the calling [`Owner`].
//! Update and delete take the id from the `?id=` query parameter.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use watchlog_core::error::CoreError;
use watchlog_core::model::{MediaInput, MediaItem};
use watchlog_core::types::DbId;
use watchlog_db::repositories::MediaRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::owner::Owner;
use crate::query::IdParams;
use crate::response::{DeletedResponse, ItemResponse, ListResponse};
use crate::state::AppState;

/// Entity name used in not-found errors.
const ENTITY: &str = "Media item";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /media
///
/// List the owner's items, most recent first.
pub async fn list(
    owner: Owner,
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<MediaItem>>> {
    let list = MediaRepo::list(&state.pool, owner.owner_id).await?;
    tracing::debug!(owner_id = owner.owner_id, count = list.len(), "Listed media items");
    Ok(Json(ListResponse { list }))
}

/// POST /media
///
/// Create an item. Returns 201 with the stored row.
pub async fn create(
    owner: Owner,
    State(state): State<AppState>,
    AppJson(input): AppJson<MediaInput>,
) -> AppResult<(StatusCode, Json<ItemResponse<MediaItem>>)> {
    let fields = input.validate()?;
    let item = MediaRepo::create(&state.pool, owner.owner_id, &fields).await?;

    tracing::info!(
        media_id = item.id,
        owner_id = owner.owner_id,
        kind = %item.kind,
        status = %item.status,
        "Media item created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            message: "Media item added".to_string(),
            item,
        }),
    ))
}

/// PUT /media?id={id}
///
/// Replace every mutable field of an item. Omitted optional fields are
/// cleared. 404 if the id does not exist for this owner.
pub async fn update(
    owner: Owner,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
    AppJson(input): AppJson<MediaInput>,
) -> AppResult<Json<ItemResponse<MediaItem>>> {
    let id = params.require("update")?;
    let fields = input.validate()?;

    let item = MediaRepo::update(&state.pool, owner.owner_id, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(media_id = id, owner_id = owner.owner_id, "Media item updated");

    Ok(Json(ItemResponse {
        message: "Media item updated".to_string(),
        item,
    }))
}

/// DELETE /media?id={id}
///
/// Remove an item. 404 if the id does not exist for this owner.
pub async fn delete(
    owner: Owner,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<DeletedResponse>> {
    let id = params.require("delete")?;

    let deleted = MediaRepo::delete(&state.pool, owner.owner_id, id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(media_id = id, owner_id = owner.owner_id, "Media item deleted");

    Ok(Json(DeletedResponse {
        message: "Media item deleted".to_string(),
        deleted_id: id,
    }))
}
