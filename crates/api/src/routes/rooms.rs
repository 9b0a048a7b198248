//! Route definitions for the room directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

/// Room routes, nested under `/rooms`.
///
/// ```text
/// GET    /                 list_rooms
/// POST   /                 create_room (privileged)
/// GET    /{id}             get_room
/// DELETE /{id}             delete_room (privileged)
/// GET    /{id}/conflicts   room_conflicts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/{id}", get(rooms::get_room).delete(rooms::delete_room))
        .route("/{id}/conflicts", get(rooms::room_conflicts))
}
