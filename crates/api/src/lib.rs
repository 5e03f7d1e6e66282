//! Gatehouse HTTP surface.
//!
//! The unit is driven by bus messages and scheduled syncs; HTTP is a
//! thin operator surface (health, manual sync, credential-scan trigger)
//! plus the process bootstrap. Exposed as a library so integration
//! tests and the binary share the router.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
