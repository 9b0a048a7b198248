//! Handlers for the room directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use salles_core::error::CoreError;
use salles_core::types::DbId;
use salles_db::models::room::CreateRoom;
use salles_db::repositories::{ReservationRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequirePrivileged;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rooms
pub async fn list_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// POST /api/v1/rooms
///
/// Create a room. Privileged only. Room names are unique; a duplicate
/// surfaces as a 409 via the `uq_rooms_name` constraint.
pub async fn create_room(
    RequirePrivileged(_user): RequirePrivileged,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Room name must not be blank".into(),
        )));
    }

    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(room_id = room.id, name = %room.name, "Room created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// GET /api/v1/rooms/{id}
pub async fn get_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(DataResponse { data: room }))
}

/// Query parameters for the conflict probe endpoint.
#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Reservation id to leave out of the check, for probing a move of
    /// an existing reservation.
    pub exclude_id: Option<DbId>,
}

/// GET /api/v1/rooms/{id}/conflicts
///
/// Probe a candidate slot: returns the approved reservations that would
/// block it. An empty list means the slot is currently free. Read-only;
/// holding a slot still requires creating and winning approval.
pub async fn room_conflicts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ConflictQuery>,
) -> AppResult<impl IntoResponse> {
    if query.end_time <= query.start_time {
        return Err(AppError::Core(CoreError::Validation(
            "End time must be after start time".into(),
        )));
    }
    if !RoomRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Room", id }));
    }

    let conflicts = ReservationRepo::find_conflicting(
        &state.pool,
        id,
        query.date,
        query.start_time,
        query.end_time,
        query.exclude_id,
    )
    .await?;
    Ok(Json(DataResponse { data: conflicts }))
}

/// DELETE /api/v1/rooms/{id}
///
/// Delete a room. Privileged only. Refused while any reservation still
/// references the room.
pub async fn delete_room(
    RequirePrivileged(_user): RequirePrivileged,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RoomRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
