//! Subscriber task that drives the [`AccessHandler`] from the bus.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio_util::sync::CancellationToken;

use gatehouse_events::{BusMessage, MessageBus};

use crate::handler::AccessHandler;

/// Consume access requests from the bus and publish decisions.
///
/// The caller passes in `bus.subscribe()` taken before this future is
/// spawned, so requests published before the task's first poll are
/// already buffered in `rx` instead of lost.
///
/// Requests are handled sequentially; each decision is one read, so the
/// loop keeps up with door-scan rates comfortably. Runs until `cancel`
/// is triggered or the bus closes.
pub async fn run(
    handler: AccessHandler,
    bus: Arc<MessageBus>,
    mut rx: Receiver<BusMessage>,
    cancel: CancellationToken,
) {
    tracing::info!("Authorization service started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Authorization service stopping");
                break;
            }
            msg = rx.recv() => {
                match msg {
                    Ok(msg) => {
                        if let Some((topic, response)) = handler.handle(&msg.topic, &msg.payload).await {
                            match serde_json::to_string(&response) {
                                Ok(json) => bus.publish(topic, json),
                                Err(e) => {
                                    tracing::error!(error = %e, "Failed to encode access response");
                                }
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Access request stream lagged, messages dropped");
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Bus closed, authorization service exiting");
                        break;
                    }
                }
            }
        }
    }
}
