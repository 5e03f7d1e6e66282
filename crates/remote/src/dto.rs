//! Wire DTOs for the backend API.
//!
//! Snapshot entity arrays stay as raw JSON values here; the synchronizer
//! decodes each array into its typed row struct right before applying
//! that entity type, so a malformed row aborts exactly one entity type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gatehouse_core::types::DbId;

/// Full site snapshot from `GET /bookings/{site_id}`.
///
/// Each array is authoritative and complete for its entity type; a local
/// row absent from it is presumed deleted upstream. A missing array is a
/// malformed snapshot for that entity type, not an empty set.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSnapshot {
    pub bookings: Option<Vec<Value>>,
    pub rooms: Option<Vec<Value>>,
    pub relations: Option<Vec<Value>>,
    #[serde(rename = "rfidKeys")]
    pub rfid_keys: Option<Vec<Value>>,
    #[serde(rename = "rfidConnections")]
    pub rfid_connections: Option<Vec<Value>>,
}

/// Booking-state payload for `PUT /update-booking/{booking_id}`.
///
/// Also the exact bytes stored in `pending_updates.payload` when a push
/// fails, so the retry drain replays precisely what was meant to be
/// sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingUpdate {
    #[serde(rename = "checkInStatus")]
    pub check_in_status: Option<String>,
    #[serde(rename = "checkInTime")]
    pub check_in_time: Option<String>,
    #[serde(rename = "checkOutTime")]
    pub check_out_time: Option<String>,
}

/// A booking row as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRow {
    pub id: DbId,
    #[serde(rename = "usersId", alias = "users_id")]
    pub users_id: Option<DbId>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "checkInToken")]
    pub check_in_token: Option<String>,
    #[serde(rename = "checkInStatus", alias = "checkInstatus")]
    pub check_in_status: Option<String>,
    #[serde(rename = "checkInTime")]
    pub check_in_time: Option<String>,
    #[serde(rename = "checkOutTime")]
    pub check_out_time: Option<String>,
    pub status: Option<String>,
}

/// A room row as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRow {
    pub id: DbId,
    pub name: String,
}

/// A booking↔room edge as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationRow {
    #[serde(rename = "bookingId", alias = "booking_id")]
    pub booking_id: DbId,
    #[serde(rename = "roomId", alias = "rooms_id")]
    pub room_id: DbId,
}

/// An RFID credential record as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RfidKeyRow {
    pub id: DbId,
    #[serde(rename = "ownerScope")]
    pub owner_scope: Option<String>,
    #[serde(rename = "isUsed", default)]
    pub is_used: bool,
    #[serde(rename = "keyValue")]
    pub key_value: String,
}

/// A live credential→room binding as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyBindingRow {
    #[serde(rename = "keyValue", alias = "key", alias = "rfidKey")]
    pub key_value: String,
    #[serde(rename = "roomId")]
    pub room_id: DbId,
    #[serde(rename = "roomName")]
    pub room_name: String,
}
