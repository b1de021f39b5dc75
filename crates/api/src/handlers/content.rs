//! Read-only content endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use envoy_core::error::CoreError;
use envoy_core::types::DbId;
use envoy_db::models::content::ContentFilter;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/content?type=&slug=
///
/// Content rows matching every supplied filter; no filters lists everything.
pub async fn list_content(
    State(state): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> AppResult<impl IntoResponse> {
    let rows = state.store.content(&filter).await?;
    tracing::debug!(
        count = rows.len(),
        content_type = ?filter.content_type,
        slug = ?filter.slug,
        "Listed content",
    );
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/content/{id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = state
        .store
        .content(&ContentFilter::by_id(id))
        .await?
        .into_iter()
        .next()
        .ok_or(CoreError::NotFound {
            entity: "Content",
            id,
        })?;
    Ok(Json(DataResponse { data: row }))
}
