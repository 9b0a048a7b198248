use chrono::{NaiveDate, NaiveTime};

use crate::status::ReservationStatus;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The admission-control gate found an approved reservation whose
    /// interval overlaps the candidate. Carries the first conflicting
    /// reservation so callers can explain the rejection.
    #[error(
        "Schedule conflict: reservation {conflicting_id} already holds room {room_id} \
         on {date} from {start_time} to {end_time}"
    )]
    Conflict {
        conflicting_id: DbId,
        room_id: DbId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },

    #[error("Invalid transition: reservation is {from}, cannot {action}")]
    InvalidTransition {
        from: ReservationStatus,
        action: &'static str,
    },

    /// The store rejected a write for a referential reason, e.g. a room
    /// deleted concurrently or a room that still has reservations attached.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
