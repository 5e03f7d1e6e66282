//! Repository for the `bookings` table.
//!
//! State transitions are guarded UPDATEs: the WHERE clause carries the
//! lifecycle precondition, so `rows_affected` decides the winner when
//! two scans of the same token race. No read-modify-write.

use sqlx::SqlitePool;

use gatehouse_core::lifecycle::{STATUS_CHECKED_IN, STATUS_CHECKED_OUT, STATUS_CONFIRMED};

use crate::models::Booking;

/// Column list for `bookings` queries.
const COLUMNS: &str = "\
    id, users_id, start_date, end_date, check_in_token, \
    check_in_status, check_in_time, check_out_time, status";

/// Provides lookups and lifecycle transitions for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Fetch a booking by its check-in token.
    pub async fn find_by_token(
        pool: &SqlitePool,
        token: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE check_in_token = ?1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Attempt the check-in transition for a token.
    ///
    /// Only bookings still in an eligible state (unset, empty, or
    /// `confirmed`) are touched; returns the number of rows transitioned
    /// (0 or 1 given the one-active-token invariant). Clears any stale
    /// check-out time.
    pub async fn check_in(
        pool: &SqlitePool,
        token: &str,
        now: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings \
             SET check_in_status = ?3, check_in_time = ?2, check_out_time = NULL \
             WHERE check_in_token = ?1 \
               AND (check_in_status IS NULL \
                    OR check_in_status = '' \
                    OR check_in_status = ?4)",
        )
        .bind(token)
        .bind(now)
        .bind(STATUS_CHECKED_IN)
        .bind(STATUS_CONFIRMED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Perform the check-out transition for a token.
    ///
    /// The guard is the complement of [`check_in`](Self::check_in): any
    /// booking past check-in eligibility checks out (a repeated scan on a
    /// checked-out booking refreshes its check-out time).
    pub async fn check_out(
        pool: &SqlitePool,
        token: &str,
        now: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings \
             SET check_in_status = ?3, check_out_time = ?2 \
             WHERE check_in_token = ?1 \
               AND check_in_status IS NOT NULL \
               AND check_in_status <> '' \
               AND check_in_status <> ?4",
        )
        .bind(token)
        .bind(now)
        .bind(STATUS_CHECKED_OUT)
        .bind(STATUS_CONFIRMED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
