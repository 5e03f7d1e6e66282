//! HTTP client for the central booking backend.
//!
//! The unit pulls a full snapshot of its site's booking graph and pushes
//! individual booking-state updates. Both calls go through the
//! [`RemoteBackend`] trait so the synchronizer and the check-in engine
//! can be driven by a fake in tests.

pub mod backend;
pub mod dto;
pub mod error;

pub use backend::{HttpBackend, RemoteBackend};
pub use dto::{BookingUpdate, RemoteSnapshot};
pub use error::RemoteError;
