//! Room directory repository.
//!
//! The conflict engine only consumes existence checks from here; the
//! rest serves the surrounding room-management surface. Deleting a room
//! that still has reservations attached (of any status) is rejected so
//! reservations are never silently orphaned.

use sqlx::PgPool;

use salles_core::error::CoreError;
use salles_core::types::DbId;

use crate::error::EngineError;
use crate::models::room::{CreateRoom, Room};

const COLUMNS: &str = "id, name, capacity, kind, created_at, updated_at";

/// CRUD and boundary queries for the `rooms` table.
pub struct RoomRepo;

impl RoomRepo {
    /// List all rooms, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY name");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Find a room by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a room with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM rooms WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether any reservation, in any status, references this room.
    pub async fn has_any_reservations(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM reservations WHERE room_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Create a room.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (name, capacity, kind) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// Delete a room, refusing while reservations reference it.
    ///
    /// The FK on `reservations.room_id` is ON DELETE RESTRICT, so a
    /// reservation created between the check and the delete still
    /// cannot orphan anything; it just surfaces as a database error
    /// instead of this explicit one.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), EngineError> {
        if Self::has_any_reservations(pool, id).await? {
            return Err(CoreError::Integrity(format!(
                "Room {id} still has reservations attached"
            ))
            .into());
        }

        let deleted: Option<DbId> = sqlx::query_scalar("DELETE FROM rooms WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match deleted {
            Some(_) => {
                tracing::info!(room_id = id, "Room deleted");
                Ok(())
            }
            None => Err(CoreError::NotFound {
                entity: "Room",
                id,
            }
            .into()),
        }
    }
}
