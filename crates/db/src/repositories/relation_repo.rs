//! Repository for the `relations` booking↔room edge table.

use sqlx::SqlitePool;

use gatehouse_core::types::DbId;

use crate::models::Room;

pub struct RelationRepo;

impl RelationRepo {
    /// All rooms a booking controls, via the relations edge table.
    pub async fn rooms_for_booking(
        pool: &SqlitePool,
        booking_id: DbId,
    ) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "SELECT rooms.id, rooms.name \
             FROM relations \
             JOIN rooms ON rooms.id = relations.room_id \
             WHERE relations.booking_id = ?1 \
             ORDER BY rooms.id",
        )
        .bind(booking_id)
        .fetch_all(pool)
        .await
    }
}
