use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use gatehouse_checkin::CheckInError;
use gatehouse_sync::SyncError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error bodies
/// of the shape `{"error": <message>, "code": <CODE>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A reconcile pass failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// A scan transition failed.
    #[error(transparent)]
    CheckIn(#[from] CheckInError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Sync(SyncError::Remote(e)) => (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNREACHABLE",
                e.to_string(),
            ),
            AppError::Sync(SyncError::MalformedSnapshot { entity, reason, .. }) => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_SNAPSHOT",
                format!("snapshot rejected at {entity}: {reason}"),
            ),
            AppError::Sync(SyncError::Database(e)) => internal(e),
            AppError::CheckIn(e) => internal(e),
            AppError::Database(e) => internal(e),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an error to a sanitized 500. The detail goes to the log, not the
/// response body.
fn internal(err: &dyn std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
