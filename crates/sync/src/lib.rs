//! Reconciliation synchronizer.
//!
//! Pulls the authoritative booking/room/credential graph from the
//! central backend and merges it into the local store: upsert everything
//! the snapshot mentions, delete everything it does not. Runs on a
//! periodic schedule and on demand via the trigger endpoint.

pub mod reconcile;
pub mod scheduler;

pub use reconcile::{reconcile, EntityStats, SyncError, SyncStats};
pub use scheduler::fetch_and_reconcile;
