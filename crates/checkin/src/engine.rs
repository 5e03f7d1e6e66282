//! The booking-token scan state machine.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use gatehouse_db::models::Booking;
use gatehouse_db::repositories::{BookingRepo, PendingUpdateRepo, RelationRepo};
use gatehouse_remote::{BookingUpdate, RemoteBackend};

use crate::actuator::LockActuator;
use crate::queue;

/// What a scan did.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The booking transitioned to `checkedIn`.
    CheckedIn(Booking),
    /// The booking transitioned to `checkedOut`.
    CheckedOut(Booking),
    /// No booking holds this token; nothing was mutated or pushed.
    UnknownToken,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The update payload could not be encoded for the queue.
    #[error("failed to encode booking update: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Drives check-in/check-out from credential scans.
pub struct CheckInEngine {
    pool: SqlitePool,
    backend: Arc<dyn RemoteBackend>,
    actuator: Arc<dyn LockActuator>,
    /// Serializes the drain/push/enqueue sequence across scans. Without
    /// it two concurrent scans both read the queue head before either
    /// deletes it (double delivery), and their pushes can land out of
    /// submission order.
    push_lock: Mutex<()>,
}

impl CheckInEngine {
    pub fn new(
        pool: SqlitePool,
        backend: Arc<dyn RemoteBackend>,
        actuator: Arc<dyn LockActuator>,
    ) -> Self {
        Self {
            pool,
            backend,
            actuator,
            push_lock: Mutex::new(()),
        }
    }

    /// Process one scanned booking token.
    ///
    /// The transition is a guarded UPDATE: with two simultaneous scans of
    /// the same token, exactly one performs the check-in and the other
    /// observes `checkedIn` and checks out. After the transition the
    /// committed row is read back so the pushed payload carries exactly
    /// what the store holds.
    pub async fn scan(&self, token: &str) -> Result<ScanOutcome, CheckInError> {
        if BookingRepo::find_by_token(&self.pool, token).await?.is_none() {
            tracing::info!(token, "Scan for unknown booking token");
            return Ok(ScanOutcome::UnknownToken);
        }

        let now = Utc::now().to_rfc3339();
        let checked_in = BookingRepo::check_in(&self.pool, token, &now).await? > 0;
        if !checked_in {
            BookingRepo::check_out(&self.pool, token, &now).await?;
        }

        // Read back the committed row; the booking can only vanish here
        // if a reconcile deleted it between the update and this read.
        let Some(booking) = BookingRepo::find_by_token(&self.pool, token).await? else {
            tracing::warn!(token, "Booking vanished after transition");
            return Ok(ScanOutcome::UnknownToken);
        };

        tracing::info!(
            booking_id = booking.id,
            status = booking.check_in_status.as_deref().unwrap_or(""),
            "Booking transitioned"
        );

        self.propagate(&booking).await?;
        self.actuate(&booking).await?;

        Ok(if checked_in {
            ScanOutcome::CheckedIn(booking)
        } else {
            ScanOutcome::CheckedOut(booking)
        })
    }

    /// Flush older failures first, then push this change; queue it if
    /// the backend is still unreachable.
    ///
    /// The whole sequence runs under the push lock: queued rows are
    /// delivered exactly once, and every older queued update reaches the
    /// backend before this scan's own push.
    async fn propagate(&self, booking: &Booking) -> Result<(), CheckInError> {
        let _serialized = self.push_lock.lock().await;

        let stats = queue::drain(&self.pool, self.backend.as_ref()).await?;
        if stats.remaining > 0 {
            tracing::warn!(remaining = stats.remaining, "Retry queue not fully drained");
        }

        let update = BookingUpdate {
            check_in_status: booking.check_in_status.clone(),
            check_in_time: booking.check_in_time.clone(),
            check_out_time: booking.check_out_time.clone(),
        };

        if let Err(e) = self.backend.push_update(booking.id, &update).await {
            let payload = serde_json::to_string(&update)?;
            let id = PendingUpdateRepo::enqueue(&self.pool, booking.id, &payload).await?;
            tracing::warn!(
                booking_id = booking.id,
                pending_id = id,
                error = %e,
                "Backend push failed, update queued"
            );
        }

        Ok(())
    }

    /// Open every room the booking controls. Failures are logged only.
    async fn actuate(&self, booking: &Booking) -> Result<(), CheckInError> {
        let rooms = RelationRepo::rooms_for_booking(&self.pool, booking.id).await?;
        for room in &rooms {
            if let Err(e) = self.actuator.open(room).await {
                tracing::error!(
                    room_id = room.id,
                    room_name = %room.name,
                    error = %e,
                    "Lock actuation failed"
                );
            }
        }
        Ok(())
    }
}
