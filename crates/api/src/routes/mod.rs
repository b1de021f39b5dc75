pub mod content;
pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                     database probe
/// /content                    list (?type=&slug=)
/// /content/{id}               get
/// /navigation                 ordered list, defaults on empty or error
/// /settings                   known names and their source
/// /settings/{name}            get, put
/// /users                      lookup (?email=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/content", content::router())
        .route("/navigation", get(handlers::navigation::list_navigation))
        .nest("/settings", settings::router())
        .route("/users", get(handlers::users::find_user))
}
