//! Handlers for the reservation lifecycle.
//!
//! Creation is open to any authenticated requester; the requester's role
//! decides whether the reservation enters as pending or pre-approved.
//! Deciding, editing, and deleting reservations are privileged
//! operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use salles_core::error::CoreError;
use salles_core::types::DbId;
use salles_db::models::reservation::{CreateReservation, DecideRequest, UpdateReservation};
use salles_db::repositories::ReservationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequirePrivileged;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reservations
///
/// List the approved schedule in calendar order. Requires authentication.
pub async fn list_approved(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reservations = ReservationRepo::list_approved(&state.pool).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/reservations/pending
///
/// List the approval queue, oldest request first. Privileged only.
pub async fn list_pending(
    RequirePrivileged(_user): RequirePrivileged,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reservations = ReservationRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/reservations/my-pending
///
/// List the caller's own pending requests.
pub async fn list_my_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reservations =
        ReservationRepo::list_pending_by_requester(&state.pool, &auth.requester_id).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/reservations/{id}
pub async fn get_reservation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))?;
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations
///
/// Create a reservation. Ordinary requesters enter the approval queue;
/// privileged requesters are auto-approved after passing the conflict
/// gate.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<impl IntoResponse> {
    let reservation =
        ReservationRepo::create(&state.pool, &input, &auth.requester_id, auth.role).await?;

    tracing::info!(
        reservation_id = reservation.id,
        requester_id = %auth.requester_id,
        role = %auth.role,
        status = %reservation.status,
        "Reservation request accepted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// POST /api/v1/reservations/{id}/decide
///
/// Approve or reject a pending reservation. Privileged only. Approval
/// re-runs the conflict check; a losing candidate stays pending.
pub async fn decide_reservation(
    RequirePrivileged(user): RequirePrivileged,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecideRequest>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::decide(
        &state.pool,
        id,
        input.action,
        &user.requester_id,
        input.rejection_reason.as_deref(),
    )
    .await?;

    tracing::info!(
        reservation_id = id,
        action = %input.action,
        approver_id = %user.requester_id,
        "Reservation decision recorded"
    );

    Ok(Json(DataResponse { data: reservation }))
}

/// PUT /api/v1/reservations/{id}
///
/// Replace a reservation's slot and activity. Privileged only. The new
/// slot is re-validated against the approved schedule regardless of the
/// reservation's current status.
pub async fn update_reservation(
    RequirePrivileged(_user): RequirePrivileged,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReservation>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// DELETE /api/v1/reservations/{id}
///
/// Remove a reservation, freeing its slot. Privileged only.
pub async fn delete_reservation(
    RequirePrivileged(_user): RequirePrivileged,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReservationRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
