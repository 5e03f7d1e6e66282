//! Repository for the `pending_updates` outbound retry queue.
//!
//! Strictly FIFO by `id`: rows are read oldest-first and deleted one at
//! a time as deliveries succeed.

use sqlx::SqlitePool;

use gatehouse_core::types::DbId;

use crate::models::PendingUpdate;

pub struct PendingUpdateRepo;

impl PendingUpdateRepo {
    /// Durably queue a payload that could not be delivered. Returns the
    /// queue row id.
    pub async fn enqueue(
        pool: &SqlitePool,
        booking_id: DbId,
        payload: &str,
    ) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO pending_updates (booking_id, payload) VALUES (?1, ?2)",
        )
        .bind(booking_id)
        .bind(payload)
        .execute(pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// All queued updates, oldest first.
    pub async fn oldest_first(pool: &SqlitePool) -> Result<Vec<PendingUpdate>, sqlx::Error> {
        sqlx::query_as::<_, PendingUpdate>(
            "SELECT id, booking_id, payload, created_at \
             FROM pending_updates ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Remove a delivered row.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM pending_updates WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Current queue depth, for logging/observability.
    pub async fn depth(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pending_updates")
            .fetch_one(pool)
            .await
    }
}
