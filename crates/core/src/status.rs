//! Reservation status state machine.
//!
//! A reservation is created as `Pending` (ordinary requester) or
//! `Approved` (privileged requester, auto-approved). A decision moves a
//! pending reservation to `Approved` or `Rejected`. `Rejected` is
//! terminal; `Approved` stays `Approved` across content updates but each
//! update is re-validated against the approved set.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed set of reservation statuses, stored as the Postgres enum type
/// `reservation_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReservationStatus {
    /// Lowercase wire/database name.
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
        }
    }

    /// Statuses reachable from `self` via a decision.
    ///
    /// Only `Pending` has outgoing transitions. `Rejected` is terminal
    /// and `Approved` is re-entered through updates, not decisions.
    pub fn valid_transitions(self) -> &'static [ReservationStatus] {
        match self {
            ReservationStatus::Pending => {
                &[ReservationStatus::Approved, ReservationStatus::Rejected]
            }
            ReservationStatus::Approved | ReservationStatus::Rejected => &[],
        }
    }

    /// Check whether a decision may move `self` to `to`.
    pub fn can_transition(self, to: ReservationStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two decision actions an approver can take on a pending reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
}

impl DecisionAction {
    /// Status this action transitions a pending reservation into.
    pub fn target_status(self) -> ReservationStatus {
        match self {
            DecisionAction::Approve => ReservationStatus::Approved,
            DecisionAction::Reject => ReservationStatus::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionAction::Approve => "approve",
            DecisionAction::Reject => "reject",
        }
    }
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that `action` may be applied to a reservation currently in
/// `from`. Deciding a non-pending reservation is an error, not a no-op:
/// an already-rejected or already-approved reservation must never be
/// silently re-decided.
pub fn validate_decision(
    from: ReservationStatus,
    action: DecisionAction,
) -> Result<(), CoreError> {
    if from.can_transition(action.target_status()) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from,
            action: action.as_str(),
        })
    }
}
