//! Periodic fetch-and-reconcile loop.
//!
//! Runs on a fixed interval until cancelled. A failed pass leaves the
//! store at its prior state and is retried on the next tick; the
//! interval is the backoff.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use gatehouse_core::types::DbId;
use gatehouse_remote::RemoteBackend;

use crate::reconcile::{reconcile, SyncError, SyncStats};

/// One full pull-and-merge pass.
pub async fn fetch_and_reconcile(
    pool: &SqlitePool,
    backend: &dyn RemoteBackend,
    site_id: DbId,
) -> Result<SyncStats, SyncError> {
    let snapshot = backend.fetch_snapshot(site_id).await?;
    reconcile(pool, &snapshot).await
}

/// Run the synchronizer loop.
///
/// Fetches and reconciles every `interval`, stopping when `cancel` is
/// triggered. Errors are logged and the loop continues.
pub async fn run(
    pool: SqlitePool,
    backend: Arc<dyn RemoteBackend>,
    site_id: DbId,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        site_id,
        interval_secs = interval.as_secs(),
        "Synchronizer started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Synchronizer stopping");
                break;
            }
            _ = ticker.tick() => {
                match fetch_and_reconcile(&pool, backend.as_ref(), site_id).await {
                    Ok(stats) => {
                        tracing::debug!(?stats, "Scheduled reconcile succeeded");
                    }
                    Err(SyncError::Remote(e)) => {
                        tracing::warn!(error = %e, "Backend unreachable, store left untouched");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reconcile failed");
                    }
                }
            }
        }
    }
}
