//! Route definitions for the reservation lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Reservation routes, nested under `/reservations`.
///
/// ```text
/// GET    /                 list_approved
/// POST   /                 create_reservation
/// GET    /pending          list_pending (privileged)
/// GET    /my-pending       list_my_pending
/// GET    /{id}             get_reservation
/// PUT    /{id}             update_reservation (privileged)
/// DELETE /{id}             delete_reservation (privileged)
/// POST   /{id}/decide      decide_reservation (privileged)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reservations::list_approved).post(reservations::create_reservation),
        )
        .route("/pending", get(reservations::list_pending))
        .route("/my-pending", get(reservations::list_my_pending))
        .route(
            "/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::delete_reservation),
        )
        .route("/{id}/decide", post(reservations::decide_reservation))
}
