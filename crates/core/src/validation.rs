//! Field-level validation shared by reservation creation and update.
//!
//! These checks fail fast, before any persistence attempt. Conflict
//! detection is a separate concern handled by the repository layer under
//! its transactional boundary.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;

/// Validate a reservation's date, times, and activity type.
///
/// Uses today's UTC date as the past-date cutoff. See
/// [`validate_slot_at`] for the clock-independent variant.
pub fn validate_slot(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    activity_type: &str,
) -> Result<(), CoreError> {
    validate_slot_at(Utc::now().date_naive(), date, start_time, end_time, activity_type)
}

/// Validate a reservation's fields against an explicit `today`.
///
/// Rules:
/// - the date must be today or later;
/// - the end time must be strictly after the start time (zero-length
///   intervals are rejected);
/// - the activity type must not be blank.
pub fn validate_slot_at(
    today: NaiveDate,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    activity_type: &str,
) -> Result<(), CoreError> {
    if date < today {
        return Err(CoreError::Validation(
            "Reservation date must not be in the past".into(),
        ));
    }

    if end_time <= start_time {
        return Err(CoreError::Validation(
            "End time must be strictly after start time".into(),
        ));
    }

    if activity_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "Activity type must not be blank".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || d(2025, 3, 10);

    #[test]
    fn valid_slot_passes() {
        assert!(validate_slot_at(TODAY(), d(2025, 3, 10), t(9, 0), t(10, 0), "Lecture").is_ok());
    }

    #[test]
    fn future_date_passes() {
        assert!(validate_slot_at(TODAY(), d(2026, 1, 1), t(9, 0), t(10, 0), "Exam").is_ok());
    }

    #[test]
    fn past_date_rejected() {
        let err = validate_slot_at(TODAY(), d(2025, 3, 9), t(9, 0), t(10, 0), "Lecture")
            .unwrap_err();
        assert!(err.to_string().contains("past"));
    }

    #[test]
    fn zero_length_interval_rejected() {
        let err =
            validate_slot_at(TODAY(), d(2025, 3, 11), t(9, 0), t(9, 0), "Lecture").unwrap_err();
        assert!(err.to_string().contains("strictly after"));
    }

    #[test]
    fn inverted_interval_rejected() {
        assert!(validate_slot_at(TODAY(), d(2025, 3, 11), t(10, 0), t(9, 0), "Lecture").is_err());
    }

    #[test]
    fn blank_activity_rejected() {
        assert!(validate_slot_at(TODAY(), d(2025, 3, 11), t(9, 0), t(10, 0), "").is_err());
        assert!(validate_slot_at(TODAY(), d(2025, 3, 11), t(9, 0), t(10, 0), "   ").is_err());
    }
}
