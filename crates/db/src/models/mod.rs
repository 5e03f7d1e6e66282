//! Local store row structs.
//!
//! Each struct is `FromRow` over its table and `Serialize` for the thin
//! API surface. Dates and times are stored as TEXT (ISO 8601 strings)
//! exactly as the backend formats them.

pub mod booking;
pub mod pending_update;
pub mod room;

pub use booking::Booking;
pub use pending_update::PendingUpdate;
pub use room::Room;
