//! Gatehouse message channel.
//!
//! This crate provides the topic-addressed bus the door terminals talk
//! over:
//!
//! - [`MessageBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. An external broker bridge (MQTT or AMQP)
//!   would pump deliveries into and out of this hub; the authorization
//!   service only ever sees [`BusMessage`]s.
//! - [`topic`] — parse/build helpers for the `<site>/<room>/auth` and
//!   `<site>/<room>/result` topic scheme.

pub mod bus;
pub mod topic;

pub use bus::{BusMessage, MessageBus};
