//! The request validation pipeline and authorization predicate.

use sqlx::SqlitePool;

use gatehouse_core::message::{AccessRequest, AccessResponse, AccessResult};
use gatehouse_core::sig::simple_sig;
use gatehouse_db::repositories::AuthzRepo;
use gatehouse_events::topic;

/// Which variant of the authorization predicate to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Credential binding + relation + checked-in booking.
    #[default]
    Standard,
    /// Additionally requires `status = active` and the booking's date
    /// range to contain today.
    Strict,
}

/// Handles one inbound access request message and produces the response
/// to publish, if any.
///
/// Stateless apart from the pool handle; safe to share and to invoke
/// concurrently — every decision is a single snapshot-consistent read.
pub struct AccessHandler {
    pool: SqlitePool,
    policy: AccessPolicy,
}

impl AccessHandler {
    pub fn new(pool: SqlitePool, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    /// Process a message. Returns the `(topic, response)` pair to
    /// publish, or `None` when the message must be dropped silently
    /// (foreign topic, malformed payload, missing fields).
    pub async fn handle(&self, msg_topic: &str, payload: &str) -> Option<(String, AccessResponse)> {
        let (site, room_segment) = topic::parse_auth_topic(msg_topic)?;

        let request: AccessRequest = match serde_json::from_str(payload) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(topic = msg_topic, error = %e, "Dropping malformed access request");
                return None;
            }
        };

        if request.card_id.is_empty() || request.door_id.is_empty() {
            tracing::warn!(topic = msg_topic, "Dropping access request with empty cardID/doorID");
            return None;
        }

        let access_result = self.decide(&request).await;
        tracing::info!(
            card_id = %request.card_id,
            door_id = %request.door_id,
            result = ?access_result,
            "Access decision"
        );

        let response = AccessResponse {
            access_result,
            ts: request.ts,
            sig: request.sig,
        };
        Some((topic::result_topic(site, room_segment), response))
    }

    /// The three-state decision: bad signature → DENY, predicate false →
    /// DENY, predicate true → OK. Store errors fail closed.
    async fn decide(&self, request: &AccessRequest) -> AccessResult {
        if let (Some(ts), Some(sig)) = (request.ts, request.sig) {
            let expected = i64::from(simple_sig(&request.card_id, &request.door_id, ts));
            if expected != sig {
                tracing::warn!(
                    card_id = %request.card_id,
                    ts,
                    sig,
                    expected,
                    "Signature mismatch"
                );
                return AccessResult::Deny;
            }
        }

        let strict = self.policy == AccessPolicy::Strict;
        match AuthzRepo::is_authorized(&self.pool, &request.card_id, &request.door_id, strict)
            .await
        {
            Ok(true) => AccessResult::Ok,
            Ok(false) => AccessResult::Deny,
            Err(e) => {
                tracing::error!(error = %e, "Store error during authorization, failing closed");
                AccessResult::Deny
            }
        }
    }
}
