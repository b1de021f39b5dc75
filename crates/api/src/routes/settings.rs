use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/settings`.
///
/// ```text
/// GET /          -> list_settings
/// GET /{name}    -> get_setting
/// PUT /{name}    -> save_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list_settings))
        .route(
            "/{name}",
            get(settings::get_setting).put(settings::save_setting),
        )
}
