//! Snapshot reconciliation: set-based upsert/delete per entity type.
//!
//! Each entity type is applied inside its own transaction, in a fixed
//! order. A malformed entity array aborts the reconcile from that point
//! on, but transactions already committed for earlier entity types stay
//! committed — the next successful reconcile converges the store.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

use gatehouse_remote::dto::{BookingRow, KeyBindingRow, RelationRow, RfidKeyRow, RoomRow};
use gatehouse_remote::{RemoteError, RemoteSnapshot};

/// Upsert/delete counts for one entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityStats {
    pub upserted: u64,
    pub deleted: u64,
}

/// Counts for a whole reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub bookings: EntityStats,
    pub rooms: EntityStats,
    pub relations: EntityStats,
    pub rfid_keys: EntityStats,
    pub key_bindings: EntityStats,
}

/// Errors from a reconciliation pass.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The snapshot fetch failed; the store was never touched.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An entity array was missing or a row failed to decode.
    /// `committed` reports what earlier entity types already applied.
    #[error("malformed snapshot for entity '{entity}': {reason}")]
    MalformedSnapshot {
        entity: &'static str,
        reason: String,
        committed: SyncStats,
    },

    /// A local store operation failed mid-reconcile.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Merge a full remote snapshot into the local store.
///
/// Entity order is fixed: bookings, rooms, relations, rfid keys, key
/// bindings. Applying the same snapshot twice is a no-op for content.
pub async fn reconcile(
    pool: &SqlitePool,
    snapshot: &RemoteSnapshot,
) -> Result<SyncStats, SyncError> {
    let mut stats = SyncStats::default();

    let bookings: Vec<BookingRow> =
        decode_rows("bookings", snapshot.bookings.as_deref(), &stats)?;
    stats.bookings = apply_bookings(pool, &bookings).await?;

    let rooms: Vec<RoomRow> = decode_rows("rooms", snapshot.rooms.as_deref(), &stats)?;
    stats.rooms = apply_rooms(pool, &rooms).await?;

    let relations: Vec<RelationRow> =
        decode_rows("relations", snapshot.relations.as_deref(), &stats)?;
    stats.relations = apply_relations(pool, &relations).await?;

    let rfid_keys: Vec<RfidKeyRow> =
        decode_rows("rfidKeys", snapshot.rfid_keys.as_deref(), &stats)?;
    stats.rfid_keys = apply_rfid_keys(pool, &rfid_keys).await?;

    let key_bindings: Vec<KeyBindingRow> = decode_rows(
        "rfidConnections",
        snapshot.rfid_connections.as_deref(),
        &stats,
    )?;
    stats.key_bindings = apply_key_bindings(pool, &key_bindings).await?;

    tracing::info!(?stats, "Reconciliation complete");
    Ok(stats)
}

/// Decode one entity array into typed rows, or abort with the stats of
/// what was already committed.
fn decode_rows<T: DeserializeOwned>(
    entity: &'static str,
    rows: Option<&[Value]>,
    committed: &SyncStats,
) -> Result<Vec<T>, SyncError> {
    let rows = rows.ok_or(SyncError::MalformedSnapshot {
        entity,
        reason: "entity array missing from snapshot".into(),
        committed: *committed,
    })?;
    rows.iter()
        .map(|v| {
            serde_json::from_value(v.clone()).map_err(|e| SyncError::MalformedSnapshot {
                entity,
                reason: e.to_string(),
                committed: *committed,
            })
        })
        .collect()
}

/// SQLite caps bind parameters per statement (32766 by default); delete
/// statements chunk their id lists well below that.
const MAX_BINDS: usize = 900;

/// Delete every row of `table` whose `key` the snapshot no longer
/// carries.
///
/// The absent set is computed locally and deleted with chunked `IN`
/// lists, so an entity array of any size stays within the bind limit.
/// An empty snapshot set deletes everything.
async fn delete_absent<'a>(
    tx: &mut sqlx::Transaction<'a, sqlx::Sqlite>,
    table: &str,
    key: &str,
    ids: &[i64],
) -> Result<u64, sqlx::Error> {
    let keep: HashSet<i64> = ids.iter().copied().collect();
    let existing: Vec<i64> = sqlx::query_scalar(&format!("SELECT {key} FROM {table}"))
        .fetch_all(&mut **tx)
        .await?;
    let absent: Vec<i64> = existing.into_iter().filter(|id| !keep.contains(id)).collect();

    let mut deleted = 0u64;
    for chunk in absent.chunks(MAX_BINDS) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM {table} WHERE {key} IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in chunk {
            query = query.bind(*id);
        }
        deleted += query.execute(&mut **tx).await?.rows_affected();
    }
    Ok(deleted)
}

async fn apply_bookings(
    pool: &SqlitePool,
    rows: &[BookingRow],
) -> Result<EntityStats, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let deleted = delete_absent(&mut tx, "bookings", "id", &ids).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO bookings (id, users_id, start_date, end_date, \
                 check_in_token, check_in_status, check_in_time, check_out_time, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             ON CONFLICT(id) DO UPDATE SET \
                 users_id = excluded.users_id, \
                 start_date = excluded.start_date, \
                 end_date = excluded.end_date, \
                 check_in_token = excluded.check_in_token, \
                 check_in_status = excluded.check_in_status, \
                 check_in_time = excluded.check_in_time, \
                 check_out_time = excluded.check_out_time, \
                 status = excluded.status",
        )
        .bind(row.id)
        .bind(row.users_id)
        .bind(&row.start_date)
        .bind(&row.end_date)
        .bind(&row.check_in_token)
        .bind(&row.check_in_status)
        .bind(&row.check_in_time)
        .bind(&row.check_out_time)
        .bind(&row.status)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(EntityStats {
        upserted: rows.len() as u64,
        deleted,
    })
}

async fn apply_rooms(pool: &SqlitePool, rows: &[RoomRow]) -> Result<EntityStats, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let deleted = delete_absent(&mut tx, "rooms", "id", &ids).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO rooms (id, name) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        )
        .bind(row.id)
        .bind(&row.name)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(EntityStats {
        upserted: rows.len() as u64,
        deleted,
    })
}

async fn apply_relations(
    pool: &SqlitePool,
    rows: &[RelationRow],
) -> Result<EntityStats, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Edges have no surrogate key; diff on the (booking_id, room_id)
    // pair, deleting in chunks of row values (two binds per edge).
    let keep: HashSet<(i64, i64)> = rows.iter().map(|r| (r.booking_id, r.room_id)).collect();
    let existing: Vec<(i64, i64)> =
        sqlx::query_as("SELECT booking_id, room_id FROM relations")
            .fetch_all(&mut *tx)
            .await?;
    let absent: Vec<(i64, i64)> = existing
        .into_iter()
        .filter(|edge| !keep.contains(edge))
        .collect();

    let mut deleted = 0u64;
    for chunk in absent.chunks(MAX_BINDS / 2) {
        let placeholders = vec!["(?, ?)"; chunk.len()].join(", ");
        let sql = format!(
            "DELETE FROM relations \
             WHERE (booking_id, room_id) IN (VALUES {placeholders})"
        );
        let mut query = sqlx::query(&sql);
        for &(booking_id, room_id) in chunk {
            query = query.bind(booking_id).bind(room_id);
        }
        deleted += query.execute(&mut *tx).await?.rows_affected();
    }

    for row in rows {
        sqlx::query("INSERT OR IGNORE INTO relations (booking_id, room_id) VALUES (?1, ?2)")
            .bind(row.booking_id)
            .bind(row.room_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(EntityStats {
        upserted: rows.len() as u64,
        deleted,
    })
}

async fn apply_rfid_keys(
    pool: &SqlitePool,
    rows: &[RfidKeyRow],
) -> Result<EntityStats, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let deleted = delete_absent(&mut tx, "rfid_keys", "id", &ids).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO rfid_keys (id, owner_scope, is_used, key_value) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(id) DO UPDATE SET \
                 owner_scope = excluded.owner_scope, \
                 is_used = excluded.is_used, \
                 key_value = excluded.key_value",
        )
        .bind(row.id)
        .bind(&row.owner_scope)
        .bind(row.is_used)
        .bind(&row.key_value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(EntityStats {
        upserted: rows.len() as u64,
        deleted,
    })
}

async fn apply_key_bindings(
    pool: &SqlitePool,
    rows: &[KeyBindingRow],
) -> Result<EntityStats, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Bindings carry no identity beyond (key, room): replace the set.
    let deleted = sqlx::query("DELETE FROM key_bindings")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for row in rows {
        sqlx::query(
            "INSERT INTO key_bindings (key_value, room_id, room_name) VALUES (?1, ?2, ?3)",
        )
        .bind(&row.key_value)
        .bind(row.room_id)
        .bind(&row.room_name)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(EntityStats {
        upserted: rows.len() as u64,
        deleted,
    })
}
