use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub email: Option<String>,
}

/// GET /api/users?email=
///
/// Look up a single user by email, case-insensitively.
pub async fn find_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<impl IntoResponse> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'email' is required".to_string()))?;

    let user = state
        .store
        .user_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with email {email}")))?;

    Ok(Json(DataResponse { data: user }))
}
