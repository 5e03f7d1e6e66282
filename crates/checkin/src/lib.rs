//! Check-in/check-out state machine and the outbound retry queue.
//!
//! A booking-token scan flips the booking between `checkedIn` and
//! `checkedOut`, pushes the new state to the backend, and opens the
//! rooms the booking controls. When the backend is unreachable the push
//! is queued durably and replayed in submission order on the next
//! opportunity.

pub mod actuator;
pub mod engine;
pub mod queue;

pub use actuator::{ActuatorError, LockActuator, NoopActuator};
pub use engine::{CheckInEngine, CheckInError, ScanOutcome};
pub use queue::{drain, DrainStats};
