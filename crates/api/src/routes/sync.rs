use axum::extract::State;
use axum::{routing::post, Json, Router};

use gatehouse_sync::{fetch_and_reconcile, SyncStats};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /sync -- run one fetch-and-reconcile pass immediately.
///
/// Returns the per-entity upsert/delete counts. A failed pass maps to a
/// JSON error (502 when the backend is at fault) and leaves the store
/// at its prior state, same as a failed scheduled pass.
async fn trigger_sync(State(state): State<AppState>) -> AppResult<Json<SyncStats>> {
    let stats = fetch_and_reconcile(&state.pool, state.backend.as_ref(), state.site_id).await?;
    tracing::info!(?stats, "Manual reconcile completed");
    Ok(Json(stats))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/sync", post(trigger_sync))
}
