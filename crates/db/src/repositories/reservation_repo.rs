//! Reservation lifecycle repository.
//!
//! Couples the overlap check and the status-changing write into one
//! transaction per operation. Every mutating path that can make a
//! reservation approved first takes `pg_advisory_xact_lock` keyed on the
//! target (room, date) bucket, so check-then-act sequences for the same
//! bucket serialize while other rooms and dates proceed in parallel.
//!
//! Lock ordering is fixed: exactly one advisory lock first, then the
//! reservation row lock. No path acquires a second advisory lock, which
//! rules out lock cycles between concurrent create/decide/update calls.

use chrono::{Datelike, NaiveDate, NaiveTime};
use sqlx::{PgExecutor, PgPool};

use salles_core::error::CoreError;
use salles_core::overlap;
use salles_core::roles::RequesterRole;
use salles_core::status::{validate_decision, DecisionAction};
use salles_core::types::DbId;
use salles_core::validation::validate_slot;

use crate::error::EngineError;
use crate::models::reservation::{CreateReservation, Reservation, UpdateReservation};
use crate::repositories::RoomRepo;

const COLUMNS: &str = "\
    id, room_id, date, start_time, end_time, activity_type, status, \
    requester_id, requested_at, approver_id, decided_at, rejection_reason";

/// Attempts before giving up when a reservation keeps moving to a
/// different room/date bucket while we try to lock it.
const MAX_LOCK_ATTEMPTS: u32 = 3;

/// Lifecycle operations and queries for the `reservations` table.
pub struct ReservationRepo;

impl ReservationRepo {
    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Find a reservation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all approved reservations in calendar order.
    pub async fn list_approved(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE status = 'approved' \
             ORDER BY date, start_time"
        );
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// List all pending reservations, oldest request first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE status = 'pending' \
             ORDER BY requested_at"
        );
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// List a requester's own pending reservations, oldest first.
    pub async fn list_pending_by_requester(
        pool: &PgPool,
        requester_id: &str,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE status = 'pending' AND requester_id = $1 \
             ORDER BY requested_at"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(requester_id)
            .fetch_all(pool)
            .await
    }

    /// Enumerate approved reservations for `room_id`/`date` whose
    /// interval overlaps the candidate `[start_time, end_time)`,
    /// excluding `exclude_id` if given.
    ///
    /// This is the overlap detector's read contract: pending and
    /// rejected reservations never count, and boundary-touching
    /// intervals are not conflicts.
    pub async fn find_conflicting<'e, E>(
        executor: E,
        room_id: DbId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<Reservation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE room_id = $1 AND date = $2 AND status = 'approved' \
             ORDER BY start_time"
        );
        let approved = sqlx::query_as::<_, Reservation>(&query)
            .bind(room_id)
            .bind(date)
            .fetch_all(executor)
            .await?;

        let slots: Vec<overlap::BookedSlot> = approved
            .iter()
            .map(|r| overlap::BookedSlot {
                id: r.id,
                start_time: r.start_time,
                end_time: r.end_time,
            })
            .collect();
        let conflicting = overlap::conflicting_slots(start_time, end_time, exclude_id, &slots);

        Ok(approved
            .into_iter()
            .filter(|r| conflicting.iter().any(|s| s.id == r.id))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    /// Create a reservation.
    ///
    /// The requester's role decides the initial status: privileged
    /// requesters enter as `approved` (recorded as their own approver)
    /// and must pass the conflict gate; ordinary requesters enter as
    /// `pending` and skip the gate entirely, so overlapping pending
    /// requests can queue for the same slot.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReservation,
        requester_id: &str,
        role: RequesterRole,
    ) -> Result<Reservation, EngineError> {
        validate_slot(input.date, input.start_time, input.end_time, &input.activity_type)?;
        Self::ensure_room_exists(pool, input.room_id).await?;

        let reservation = if role.conflict_gate_on_create() {
            let mut tx = pool.begin().await?;
            lock_slot_bucket(&mut tx, input.room_id, input.date).await?;

            let conflicts = Self::find_conflicting(
                &mut *tx,
                input.room_id,
                input.date,
                input.start_time,
                input.end_time,
                None,
            )
            .await?;
            if let Some(conflict) = conflicts.first() {
                return Err(conflict_error(conflict).into());
            }

            let query = format!(
                "INSERT INTO reservations \
                 (room_id, date, start_time, end_time, activity_type, status, \
                  requester_id, approver_id, decided_at) \
                 VALUES ($1, $2, $3, $4, $5, 'approved', $6, $6, now()) \
                 RETURNING {COLUMNS}"
            );
            let reservation = sqlx::query_as::<_, Reservation>(&query)
                .bind(input.room_id)
                .bind(input.date)
                .bind(input.start_time)
                .bind(input.end_time)
                .bind(&input.activity_type)
                .bind(requester_id)
                .fetch_one(&mut *tx)
                .await?;
            tx.commit().await?;
            reservation
        } else {
            let query = format!(
                "INSERT INTO reservations \
                 (room_id, date, start_time, end_time, activity_type, status, requester_id) \
                 VALUES ($1, $2, $3, $4, $5, 'pending', $6) \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Reservation>(&query)
                .bind(input.room_id)
                .bind(input.date)
                .bind(input.start_time)
                .bind(input.end_time)
                .bind(&input.activity_type)
                .bind(requester_id)
                .fetch_one(pool)
                .await?
        };

        tracing::info!(
            reservation_id = reservation.id,
            room_id = reservation.room_id,
            date = %reservation.date,
            status = %reservation.status,
            requester_id = %reservation.requester_id,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Approve or reject a pending reservation.
    ///
    /// Approval re-runs the overlap detector excluding the target's own
    /// id; any conflict aborts and the reservation stays pending.
    /// Rejection is unconditional. Deciding a non-pending reservation
    /// fails with an invalid-transition error.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        action: DecisionAction,
        approver_id: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Reservation, EngineError> {
        for _ in 0..MAX_LOCK_ATTEMPTS {
            // Read outside the lock to learn which bucket to serialize on.
            let preview = Self::find_by_id(pool, id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Reservation",
                    id,
                })?;

            let mut tx = pool.begin().await?;
            lock_slot_bucket(&mut tx, preview.room_id, preview.date).await?;

            let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
            let current = sqlx::query_as::<_, Reservation>(&query)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Reservation",
                    id,
                })?;

            // A concurrent update may have moved the reservation to a
            // different room/date after we picked the lock key. Retry on
            // the new bucket; the transaction rolls back on drop.
            if (current.room_id, current.date) != (preview.room_id, preview.date) {
                continue;
            }

            validate_decision(current.status, action)?;

            let decided = match action {
                DecisionAction::Approve => {
                    let conflicts = Self::find_conflicting(
                        &mut *tx,
                        current.room_id,
                        current.date,
                        current.start_time,
                        current.end_time,
                        Some(current.id),
                    )
                    .await?;
                    if let Some(conflict) = conflicts.first() {
                        return Err(conflict_error(conflict).into());
                    }

                    let query = format!(
                        "UPDATE reservations \
                         SET status = 'approved', approver_id = $2, decided_at = now() \
                         WHERE id = $1 \
                         RETURNING {COLUMNS}"
                    );
                    sqlx::query_as::<_, Reservation>(&query)
                        .bind(id)
                        .bind(approver_id)
                        .fetch_one(&mut *tx)
                        .await?
                }
                DecisionAction::Reject => {
                    let query = format!(
                        "UPDATE reservations \
                         SET status = 'rejected', approver_id = $2, decided_at = now(), \
                             rejection_reason = $3 \
                         WHERE id = $1 \
                         RETURNING {COLUMNS}"
                    );
                    sqlx::query_as::<_, Reservation>(&query)
                        .bind(id)
                        .bind(approver_id)
                        .bind(rejection_reason)
                        .fetch_one(&mut *tx)
                        .await?
                }
            };
            tx.commit().await?;

            tracing::info!(
                reservation_id = decided.id,
                room_id = decided.room_id,
                action = %action,
                approver_id = %approver_id,
                "Reservation decided"
            );
            return Ok(decided);
        }

        Err(CoreError::Internal(format!(
            "Could not acquire a stable room/date lock for reservation {id}"
        ))
        .into())
    }

    /// Replace a reservation's mutable fields (room, date, times,
    /// activity type).
    ///
    /// The overlap detector always runs against the new room/date/times,
    /// excluding the reservation's own id, regardless of current status:
    /// an approved reservation must not drift into overlap, and a
    /// pending one is validated against the approved set so an operator
    /// editing it sees conflicts before a later approval.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReservation,
    ) -> Result<Reservation, EngineError> {
        validate_slot(input.date, input.start_time, input.end_time, &input.activity_type)?;
        Self::ensure_room_exists(pool, input.room_id).await?;

        let mut tx = pool.begin().await?;
        lock_slot_bucket(&mut tx, input.room_id, input.date).await?;

        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;

        let conflicts = Self::find_conflicting(
            &mut *tx,
            input.room_id,
            input.date,
            input.start_time,
            input.end_time,
            Some(id),
        )
        .await?;
        if let Some(conflict) = conflicts.first() {
            return Err(conflict_error(conflict).into());
        }

        let query = format!(
            "UPDATE reservations \
             SET room_id = $2, date = $3, start_time = $4, end_time = $5, activity_type = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(input.room_id)
            .bind(input.date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.activity_type)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            reservation_id = updated.id,
            room_id = updated.room_id,
            date = %updated.date,
            "Reservation updated"
        );
        Ok(updated)
    }

    /// Hard-delete a reservation. Removal only reduces contention, so
    /// no conflict check is needed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), EngineError> {
        let deleted: Option<DbId> =
            sqlx::query_scalar("DELETE FROM reservations WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        match deleted {
            Some(_) => {
                tracing::info!(reservation_id = id, "Reservation deleted");
                Ok(())
            }
            None => Err(CoreError::NotFound {
                entity: "Reservation",
                id,
            }
            .into()),
        }
    }

    async fn ensure_room_exists(pool: &PgPool, room_id: DbId) -> Result<(), EngineError> {
        if RoomRepo::exists(pool, room_id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Room",
                id: room_id,
            }
            .into())
        }
    }
}

/// Serialize all check-then-act sequences for one (room, date) bucket.
///
/// The key folds room id and day number into one i64; a collision
/// between distinct buckets only costs extra serialization, never
/// correctness. The lock is transaction-scoped and released on
/// commit or rollback.
async fn lock_slot_bucket(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    room_id: DbId,
    date: NaiveDate,
) -> Result<(), sqlx::Error> {
    let key = (room_id << 20) ^ i64::from(date.num_days_from_ce());
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Build the conflict error for the first blocking reservation.
fn conflict_error(conflict: &Reservation) -> CoreError {
    CoreError::Conflict {
        conflicting_id: conflict.id,
        room_id: conflict.room_id,
        date: conflict.date,
        start_time: conflict.start_time,
        end_time: conflict.end_time,
    }
}
