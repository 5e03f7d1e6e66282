//! Door/locker actuation seam.
//!
//! Actuation is a side effect delegated to external hardware (a serial
//! locker board, an MQTT-driven strike plate). Failures are logged by
//! the engine and never roll back the state transition or the backend
//! push.

use async_trait::async_trait;

use gatehouse_db::models::Room;

/// An actuator failed to fire.
#[derive(Debug, thiserror::Error)]
#[error("actuator failure: {0}")]
pub struct ActuatorError(pub String);

/// Opens the physical lock for a room.
#[async_trait]
pub trait LockActuator: Send + Sync {
    async fn open(&self, room: &Room) -> Result<(), ActuatorError>;
}

/// Actuator that only logs — for sites where door hardware listens on
/// the bus directly, and for tests.
pub struct NoopActuator;

#[async_trait]
impl LockActuator for NoopActuator {
    async fn open(&self, room: &Room) -> Result<(), ActuatorError> {
        tracing::info!(room_id = room.id, room_name = %room.name, "Open requested (noop)");
        Ok(())
    }
}
