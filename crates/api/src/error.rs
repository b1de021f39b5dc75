use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use envoy_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `envoy_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource with a human-readable message.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({});

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::UnknownSetting { name, known } => {
                    body["available"] = json!(known);
                    (
                        StatusCode::NOT_FOUND,
                        "UNKNOWN_SETTING",
                        format!("Setting '{name}' not found"),
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unavailable(msg) => {
                    tracing::error!(error = %msg, "Storage unavailable");
                    body["detail"] = json!(msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_UNAVAILABLE",
                        "The database is unavailable".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        };

        body["error"] = json!(message);
        body["code"] = json!(code);

        (status, axum::Json(body)).into_response()
    }
}

/// SQLSTATE MySQL reports for integrity violations, including `ER_DUP_ENTRY`.
const MYSQL_INTEGRITY_VIOLATION: &str = "23000";

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Duplicate-key violations on a `uq_` index map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(MYSQL_INTEGRITY_VIOLATION)
                && db_err.message().starts_with("Duplicate entry")
                && db_err.message().contains("uq_")
            {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Duplicate value violates a unique index".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unknown_setting_lists_available_names() {
        let err = AppError::Core(CoreError::UnknownSetting {
            name: "sidebar".into(),
            known: vec!["header", "footer"],
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "UNKNOWN_SETTING");
        assert_eq!(body["available"], json!(["header", "footer"]));
    }

    #[tokio::test]
    async fn unavailable_carries_detail() {
        let err = AppError::Core(CoreError::Unavailable("pool timed out".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "pool timed out");
    }

    #[tokio::test]
    async fn internal_errors_are_sanitized() {
        let err = AppError::Core(CoreError::Internal("secret stack".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn row_not_found_maps_to_404() {
        let (status, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn validation_maps_to_400() {
        let err = AppError::Core(CoreError::Validation("bad".into()));
        let (status, _) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
