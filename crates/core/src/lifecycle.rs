//! Booking check-in lifecycle constants and transition rules.
//!
//! The `check_in_status` column walks `unset | "" | confirmed` →
//! `checkedIn` → `checkedOut`. A credential scan on an eligible booking
//! performs a check-in; a scan on anything else performs a check-out.
//! The literals are wire values shared with the central backend — do not
//! rename them.

/// Backend confirmed the booking but the guest has not arrived yet.
pub const STATUS_CONFIRMED: &str = "confirmed";
/// Guest is currently checked in.
pub const STATUS_CHECKED_IN: &str = "checkedIn";
/// Guest has checked out.
pub const STATUS_CHECKED_OUT: &str = "checkedOut";

/// Remote lifecycle tag for a live booking (strict access policy only).
pub const BOOKING_ACTIVE: &str = "active";
