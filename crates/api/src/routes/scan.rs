use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;

use gatehouse_checkin::ScanOutcome;

use crate::error::AppResult;
use crate::state::AppState;

/// Body for the credential-scan trigger.
#[derive(Deserialize)]
pub struct ScanRequest {
    /// The booking token carried by the scanned credential.
    pub token: String,
}

/// POST /scan -- feed one scanned booking token to the check-in engine.
///
/// This is the seam the reader hardware (or an operator) drives; the
/// state transition, backend push, and lock actuation all happen inside
/// the engine.
async fn scan(State(state): State<AppState>, Json(req): Json<ScanRequest>) -> AppResult<Response> {
    let response = match state.engine.scan(&req.token).await? {
        ScanOutcome::CheckedIn(booking) => Json(json!({
            "outcome": "checkedIn",
            "booking": booking,
        }))
        .into_response(),
        ScanOutcome::CheckedOut(booking) => Json(json!({
            "outcome": "checkedOut",
            "booking": booking,
        }))
        .into_response(),
        ScanOutcome::UnknownToken => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "no booking holds this token",
                "code": "UNKNOWN_TOKEN",
            })),
        )
            .into_response(),
    };
    Ok(response)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/scan", post(scan))
}
