//! In-process topic bus backed by a `tokio::sync::broadcast` channel.
//!
//! Designed to be shared via `Arc<MessageBus>` across the application.
//! Request/response has no protocol-level retry: a dropped message is a
//! dropped message, and the terminal retransmits.

use tokio::sync::broadcast;

/// A raw message on the bus: a topic and a JSON payload.
///
/// Payloads stay as strings until a handler validates them into typed
/// structs at its own boundary.
#[derive(Debug, Clone)]
pub struct BusMessage {
    pub topic: String,
    pub payload: String,
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out message bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`BusMessage`].
pub struct MessageBus {
    sender: broadcast::Sender<BusMessage>,
}

impl MessageBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a message to all current subscribers.
    ///
    /// If there are no active subscribers the message is silently
    /// dropped.
    pub fn publish(&self, topic: impl Into<String>, payload: impl Into<String>) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(BusMessage {
            topic: topic.into(),
            payload: payload.into(),
        });
    }

    /// Subscribe to all messages published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.sender.subscribe()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
