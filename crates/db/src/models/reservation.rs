//! Reservation entity model and request DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salles_core::status::{DecisionAction, ReservationStatus};
use salles_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub room_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub activity_type: String,
    pub status: ReservationStatus,
    pub requester_id: String,
    pub requested_at: Timestamp,
    pub approver_id: Option<String>,
    pub decided_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
}

/// DTO for creating a reservation. Requester identity and role come
/// from the auth boundary, not the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    pub room_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub activity_type: String,
}

/// DTO for updating a reservation's mutable fields. Status, requester
/// identity, and request timestamp are never touched by an update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReservation {
    pub room_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub activity_type: String,
}

/// Request body for the decide endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideRequest {
    pub action: DecisionAction,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}
