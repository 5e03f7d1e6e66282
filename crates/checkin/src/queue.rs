//! Outbound retry queue drain.
//!
//! Pending updates replay strictly oldest-first; the first failure stops
//! the whole drain. A blocked backend is assumed blocked for the batch,
//! and delivery order matters more than best-effort delivery of newer
//! items — later rows are never attempted past a failure.

use serde::Serialize;
use sqlx::SqlitePool;

use gatehouse_db::repositories::PendingUpdateRepo;
use gatehouse_remote::{BookingUpdate, RemoteBackend};

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainStats {
    /// Rows delivered and deleted this pass.
    pub delivered: u64,
    /// Rows still queued when the pass ended.
    pub remaining: u64,
}

/// Replay queued updates in submission order until one fails.
pub async fn drain(
    pool: &SqlitePool,
    backend: &dyn RemoteBackend,
) -> Result<DrainStats, sqlx::Error> {
    let rows = PendingUpdateRepo::oldest_first(pool).await?;
    let total = rows.len() as u64;
    let mut delivered = 0u64;

    for row in rows {
        let update: BookingUpdate = match serde_json::from_str(&row.payload) {
            Ok(update) => update,
            Err(e) => {
                // An undecodable head row blocks the queue like any other
                // failure; deleting it would silently lose a state change.
                tracing::error!(
                    id = row.id,
                    booking_id = row.booking_id,
                    error = %e,
                    "Pending update payload undecodable, drain blocked"
                );
                break;
            }
        };

        match backend.push_update(row.booking_id, &update).await {
            Ok(()) => {
                PendingUpdateRepo::delete(pool, row.id).await?;
                delivered += 1;
                tracing::debug!(id = row.id, booking_id = row.booking_id, "Pending update flushed");
            }
            Err(e) => {
                tracing::warn!(
                    id = row.id,
                    booking_id = row.booking_id,
                    error = %e,
                    "Pending update still undeliverable, stopping drain"
                );
                break;
            }
        }
    }

    Ok(DrainStats {
        delivered,
        remaining: total - delivered,
    })
}
