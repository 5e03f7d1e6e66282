use gatehouse_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// `check_in_status` and the two times are the only fields mutated
/// locally (by the check-in engine); everything else is owned by the
/// synchronizer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub users_id: Option<DbId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub check_in_token: Option<String>,
    pub check_in_status: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub status: Option<String>,
}
