//! Requester role classification and the creation decision table.
//!
//! Roles are issued by the identity boundary; this crate trusts the
//! classification and only derives scheduling behaviour from it. The
//! decision table is deliberately explicit: role determines the initial
//! status, and the initial status alone determines whether the conflict
//! gate runs at creation time.

use crate::status::ReservationStatus;

/// Role name carried in tokens for privileged requesters.
pub const ROLE_PRIVILEGED: &str = "privileged";

/// Role name carried in tokens for ordinary requesters.
pub const ROLE_ORDINARY: &str = "ordinary";

/// Classification of a requester for reservation creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequesterRole {
    /// Queues through the pending/approval workflow.
    Ordinary,
    /// Bypasses the queue: reservations are created pre-approved with
    /// the requester recorded as their own approver.
    Privileged,
}

impl RequesterRole {
    /// Map a role name from the identity boundary to a classification.
    ///
    /// Unknown names classify as `Ordinary` so a misconfigured role can
    /// never grant the auto-approval fast path.
    pub fn from_name(name: &str) -> Self {
        if name == ROLE_PRIVILEGED {
            RequesterRole::Privileged
        } else {
            RequesterRole::Ordinary
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequesterRole::Ordinary => ROLE_ORDINARY,
            RequesterRole::Privileged => ROLE_PRIVILEGED,
        }
    }

    /// Initial status of a reservation created by this role.
    pub fn initial_status(self) -> ReservationStatus {
        match self {
            RequesterRole::Ordinary => ReservationStatus::Pending,
            RequesterRole::Privileged => ReservationStatus::Approved,
        }
    }

    /// Whether creation must run the overlap detector before persisting.
    ///
    /// Only reservations entering as `Approved` are gated. Pending
    /// creates skip the check so multiple candidates can queue for the
    /// same slot; conflict is deferred to approval time.
    pub fn conflict_gate_on_create(self) -> bool {
        self.initial_status() == ReservationStatus::Approved
    }
}

impl std::fmt::Display for RequesterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
