use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use gatehouse_core::types::DbId;
use gatehouse_db::models::Room;
use gatehouse_remote::{BookingUpdate, RemoteBackend, RemoteError, RemoteSnapshot};

use gatehouse_checkin::{ActuatorError, LockActuator};

/// Scriptable backend: flip `fail` to simulate an outage; every push
/// attempt (successful or not) is recorded in order.
#[derive(Default)]
pub struct FakeBackend {
    pub fail: AtomicBool,
    pub latency: Option<Duration>,
    pub attempts: Mutex<Vec<DbId>>,
    pub delivered: Mutex<Vec<(DbId, BookingUpdate)>>,
}

impl FakeBackend {
    pub fn failing() -> Self {
        let backend = Self::default();
        backend.fail.store(true, Ordering::SeqCst);
        backend
    }

    /// Every push takes `latency` to complete, widening race windows.
    pub fn slow(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn attempt_order(&self) -> Vec<DbId> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn delivered_order(&self) -> Vec<(DbId, BookingUpdate)> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteBackend for FakeBackend {
    async fn fetch_snapshot(&self, _site_id: DbId) -> Result<RemoteSnapshot, RemoteError> {
        Err(RemoteError::HttpStatus {
            status: 500,
            body: "not used in these tests".into(),
        })
    }

    async fn push_update(
        &self,
        booking_id: DbId,
        update: &BookingUpdate,
    ) -> Result<(), RemoteError> {
        self.attempts.lock().unwrap().push(booking_id);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(RemoteError::HttpStatus {
                status: 503,
                body: "backend down".into(),
            });
        }
        self.delivered
            .lock()
            .unwrap()
            .push((booking_id, update.clone()));
        Ok(())
    }
}

/// Actuator that records which rooms it opened; optionally fails.
#[derive(Default)]
pub struct RecordingActuator {
    pub fail: AtomicBool,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingActuator {
    pub fn failing() -> Self {
        let actuator = Self::default();
        actuator.fail.store(true, Ordering::SeqCst);
        actuator
    }

    pub fn opened_rooms(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl LockActuator for RecordingActuator {
    async fn open(&self, room: &Room) -> Result<(), ActuatorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ActuatorError(format!("jammed: {}", room.name)));
        }
        self.opened.lock().unwrap().push(room.name.clone());
        Ok(())
    }
}
