//! Room directory models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salles_core::types::{DbId, Timestamp};

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub kind: String,
}
