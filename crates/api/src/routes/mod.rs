pub mod health;
pub mod reservations;
pub mod rooms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reservations                        list approved (GET), create (POST)
/// /reservations/pending                approval queue (privileged)
/// /reservations/my-pending             caller's own pending requests
/// /reservations/{id}                   get, update (PUT), delete (privileged)
/// /reservations/{id}/decide            approve/reject (POST, privileged)
///
/// /rooms                               list (GET), create (POST, privileged)
/// /rooms/{id}                          get, delete (privileged)
/// /rooms/{id}/conflicts                probe a candidate slot (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reservations", reservations::router())
        .nest("/rooms", rooms::router())
}
