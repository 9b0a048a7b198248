//! Domain logic for the salles reservation backend.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling. It owns
//! the reservation status state machine, the requester role decision
//! table, the interval-overlap rule, and request validation.

pub mod error;
pub mod overlap;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
