//! Message-driven authorization service.
//!
//! Answers door access requests from the local store only: no network
//! round trip stands between a card tap and its decision. Every request
//! gets an immediate `OK` or `DENY` from locally cached data — that is
//! the point of keeping a local replica. Any uncertainty (bad signature,
//! missing data, store error) resolves to `DENY`.

pub mod handler;
pub mod worker;

pub use handler::{AccessHandler, AccessPolicy};
pub use worker::run;
