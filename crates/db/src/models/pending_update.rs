use gatehouse_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A durably queued booking-state push that could not reach the backend.
///
/// FIFO by `id`; deleted only after a successful delivery.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingUpdate {
    pub id: DbId,
    pub booking_id: DbId,
    /// JSON-encoded booking update payload, exactly as it will be sent.
    pub payload: String,
    pub created_at: String,
}
