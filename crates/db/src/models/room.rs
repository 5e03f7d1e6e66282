use gatehouse_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `rooms` table. `name` is the door-facing key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
}
