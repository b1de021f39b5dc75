use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Content routes mounted at `/content`.
///
/// ```text
/// GET /        -> list_content
/// GET /{id}    -> get_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content))
        .route("/{id}", get(content::get_content))
}
