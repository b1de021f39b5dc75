use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use envoy_db::models::navigation::NavigationRow;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/navigation
///
/// Navigation rows in display order. Never fails: an empty table or a
/// database error serves the compiled default navigation.
pub async fn list_navigation(State(state): State<AppState>) -> impl IntoResponse {
    let rows = match state.store.navigation().await {
        Ok(rows) if !rows.is_empty() => rows,
        Ok(_) => {
            tracing::debug!("Navigation table empty, serving defaults");
            NavigationRow::defaults()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Navigation lookup failed, serving defaults");
            NavigationRow::defaults()
        }
    };
    Json(DataResponse { data: rows })
}
