//! Interval-overlap rule for reservation slots.
//!
//! Reservation intervals are half-open: `[start, end)`. Two intervals
//! overlap iff `s1 < e2 && e1 > s2`, so an interval ending exactly when
//! another starts is NOT a conflict. This is what makes back-to-back
//! bookings (09:00-10:00 followed by 10:00-11:00) legal.

use chrono::NaiveTime;

use crate::types::DbId;

/// Half-open-interval overlap test.
pub fn overlaps(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && e1 > s2
}

/// A booked slot as seen by the overlap detector: just an id and its
/// interval. The detector never inspects any other reservation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedSlot {
    pub id: DbId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Return the slots in `existing` whose interval overlaps the candidate
/// `[start, end)`, skipping the slot identified by `exclude_id`.
///
/// `exclude_id` is used when re-validating an existing reservation
/// against itself during update or approval. The caller is responsible
/// for only passing slots that are already approved for the same room
/// and date; pending and rejected reservations never participate in
/// conflict detection.
pub fn conflicting_slots(
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<DbId>,
    existing: &[BookedSlot],
) -> Vec<BookedSlot> {
    existing
        .iter()
        .filter(|slot| exclude_id != Some(slot.id))
        .filter(|slot| overlaps(start, end, slot.start_time, slot.end_time))
        .copied()
        .collect()
}
