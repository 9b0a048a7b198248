//! HTTP handlers, grouped by resource.

pub mod reservations;
pub mod rooms;
