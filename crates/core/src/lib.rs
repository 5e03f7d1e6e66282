//! Shared domain types for the gatehouse access-control unit.
//!
//! Everything here is pure: identifier aliases, the booking check-in
//! lifecycle, the typed access request/response messages exchanged with
//! door terminals, and the 16-bit message integrity checksum shared with
//! the terminal firmware.

pub mod lifecycle;
pub mod message;
pub mod sig;
pub mod types;
