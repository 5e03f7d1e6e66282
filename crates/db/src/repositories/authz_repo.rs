//! The authorization predicate, as a single read-only query.
//!
//! The credential must be bound to the requested room (key_bindings),
//! and a relation must connect that room to a booking that is currently
//! checked in. The strict variant additionally requires the booking to
//! be `active` and today to fall inside its date range.

use sqlx::SqlitePool;

use gatehouse_core::lifecycle::{BOOKING_ACTIVE, STATUS_CHECKED_IN};

const BASE_PREDICATE: &str = "\
    SELECT 1 \
    FROM key_bindings kb \
    JOIN rooms r ON r.id = kb.room_id \
    JOIN relations rel ON rel.room_id = r.id \
    JOIN bookings b ON b.id = rel.booking_id \
    WHERE kb.key_value = ?1 \
      AND kb.room_name = ?2 \
      AND b.check_in_status = ?3";

const STRICT_PREDICATE_SUFFIX: &str = " \
      AND b.status = ?4 \
      AND date(b.start_date) <= date('now') \
      AND date(b.end_date) >= date('now')";

pub struct AuthzRepo;

impl AuthzRepo {
    /// Evaluate the access predicate for a credential and room name.
    ///
    /// Read-only and snapshot-consistent: a single statement runs inside
    /// one implicit transaction, so it never observes a half-committed
    /// reconciliation.
    pub async fn is_authorized(
        pool: &SqlitePool,
        card_id: &str,
        room_name: &str,
        strict: bool,
    ) -> Result<bool, sqlx::Error> {
        let query = if strict {
            format!("{BASE_PREDICATE}{STRICT_PREDICATE_SUFFIX} LIMIT 1")
        } else {
            format!("{BASE_PREDICATE} LIMIT 1")
        };

        let mut q = sqlx::query_scalar::<_, i64>(&query)
            .bind(card_id)
            .bind(room_name)
            .bind(STATUS_CHECKED_IN);
        if strict {
            q = q.bind(BOOKING_ACTIVE);
        }

        Ok(q.fetch_optional(pool).await?.is_some())
    }
}
