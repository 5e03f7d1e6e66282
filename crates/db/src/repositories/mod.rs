//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument. The synchronizer writes
//! its own transactional statements and does not go through this layer.

pub mod authz_repo;
pub mod booking_repo;
pub mod pending_update_repo;
pub mod relation_repo;

pub use authz_repo::AuthzRepo;
pub use booking_repo::BookingRepo;
pub use pending_update_repo::PendingUpdateRepo;
pub use relation_repo::RelationRepo;
