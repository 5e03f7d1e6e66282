use std::sync::Arc;

use gatehouse_checkin::CheckInEngine;
use gatehouse_core::types::DbId;
use gatehouse_remote::RemoteBackend;

/// Shared state for the HTTP handlers. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Local store connection pool.
    pub pool: gatehouse_db::DbPool,
    /// Remote booking backend, shared with the scheduler and engine.
    pub backend: Arc<dyn RemoteBackend>,
    /// Check-in engine driven by `POST /scan`.
    pub engine: Arc<CheckInEngine>,
    /// Site whose snapshot this unit reconciles.
    pub site_id: DbId,
}
