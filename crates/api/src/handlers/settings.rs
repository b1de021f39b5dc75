//! Named settings endpoints.
//!
//! `GET /settings/{name}` returns the setting document itself, not wrapped
//! in an envelope, and reports where it came from in response headers.

use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;
use envoy_events::SiteEvent;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// `stored` or `default`.
pub const SETTING_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-setting-source");

/// Why a default was served: `missing`, `malformed` or `unavailable`.
pub const SETTING_FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-setting-fallback");

#[derive(Debug, Serialize)]
pub struct SavedSetting {
    pub name: String,
    pub value: Value,
}

/// GET /api/settings
///
/// Every known setting name with the source it currently resolves from.
pub async fn list_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.settings.overview().await,
    })
}

/// GET /api/settings/{name}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let resolved = state.settings.resolve(&name).await?;

    let source = HeaderValue::from_static(resolved.source());
    let fallback = resolved
        .fallback_reason()
        .map(|reason| HeaderValue::from_static(reason.as_str()));

    let mut response = Json(resolved.into_value()).into_response();
    let headers = response.headers_mut();
    headers.insert(SETTING_SOURCE_HEADER, source);
    if let Some(fallback) = fallback {
        headers.insert(SETTING_FALLBACK_HEADER, fallback);
    }
    Ok(response)
}

/// PUT /api/settings/{name}
///
/// Replace the whole document stored under a known setting name.
pub async fn save_setting(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(value): Json<Value>,
) -> AppResult<impl IntoResponse> {
    state.settings.set(&name, &value).await?;
    state.event_bus.publish(SiteEvent::setting_saved(name.as_str()));

    Ok(Json(DataResponse {
        data: SavedSetting { name, value },
    }))
}
