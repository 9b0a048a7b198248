//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Lifecycle operations that
//! must couple a conflict check to a write run inside a single
//! transaction serialized per room/date bucket.

pub mod reservation_repo;
pub mod room_repo;

pub use reservation_repo::ReservationRepo;
pub use room_repo::RoomRepo;
