//! Detect overlaps between a proposed session and a mentor's booked sessions.
//!
//! Intervals are half-open `[start, end)`: a session ending exactly when the
//! candidate starts is NOT a conflict. Only SCHEDULED sessions of the same
//! mentor count; the mentee's own calendar is never consulted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Session, SessionStatus};

/// Returns the first blocking session, if any.
pub fn find_conflict<'a>(
    mentor_id: Uuid,
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    existing: &'a [Session],
) -> Option<&'a Session> {
    existing.iter().find(|s| {
        s.mentor_id == mentor_id
            && s.status == SessionStatus::Scheduled
            && s.scheduled_time < candidate_end
            && candidate_start < s.end_time
    })
}

/// True iff `[candidate_start, candidate_end)` overlaps a SCHEDULED session of `mentor_id`.
pub fn has_conflict(
    mentor_id: Uuid,
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    existing: &[Session],
) -> bool {
    find_conflict(mentor_id, candidate_start, candidate_end, existing).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, h, m, 0).unwrap()
    }

    fn session(mentor_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>, status: SessionStatus) -> Session {
        Session {
            id: Uuid::new_v4(),
            mentor_id,
            mentee_id: Uuid::new_v4(),
            scheduled_time: start,
            end_time: end,
            duration: (end - start).num_minutes() as i32,
            status,
            topic: None,
            comments: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partial_overlap() {
        let mentor = Uuid::new_v4();
        let existing = vec![session(mentor, at(10, 0), at(11, 0), SessionStatus::Scheduled)];
        assert!(has_conflict(mentor, at(10, 30), at(11, 30), &existing));
    }

    #[test]
    fn test_adjacent_is_not_conflict() {
        let mentor = Uuid::new_v4();
        let existing = vec![session(mentor, at(10, 0), at(11, 0), SessionStatus::Scheduled)];
        assert!(!has_conflict(mentor, at(11, 0), at(12, 0), &existing));
        assert!(!has_conflict(mentor, at(9, 0), at(10, 0), &existing));
    }

    #[test]
    fn test_containment_both_ways() {
        let mentor = Uuid::new_v4();
        let existing = vec![session(mentor, at(10, 0), at(12, 0), SessionStatus::Scheduled)];
        assert!(has_conflict(mentor, at(10, 30), at(11, 0), &existing));
        assert!(has_conflict(mentor, at(9, 0), at(13, 0), &existing));
        assert!(has_conflict(mentor, at(10, 0), at(12, 0), &existing));
    }

    #[test]
    fn test_inactive_sessions_ignored() {
        let mentor = Uuid::new_v4();
        let existing = vec![
            session(mentor, at(10, 0), at(11, 0), SessionStatus::Cancelled),
            session(mentor, at(10, 0), at(11, 0), SessionStatus::Completed),
        ];
        assert!(!has_conflict(mentor, at(10, 0), at(11, 0), &existing));
    }

    #[test]
    fn test_other_mentor_ignored() {
        let mentor = Uuid::new_v4();
        let existing = vec![session(Uuid::new_v4(), at(10, 0), at(11, 0), SessionStatus::Scheduled)];
        assert!(!has_conflict(mentor, at(10, 0), at(11, 0), &existing));
    }

    #[test]
    fn test_find_conflict_returns_blocking_session() {
        let mentor = Uuid::new_v4();
        let blocking = session(mentor, at(14, 0), at(15, 0), SessionStatus::Scheduled);
        let existing = vec![
            session(mentor, at(9, 0), at(10, 0), SessionStatus::Scheduled),
            blocking.clone(),
        ];
        assert_eq!(
            find_conflict(mentor, at(14, 30), at(16, 0), &existing),
            Some(&blocking)
        );
    }

    #[test]
    fn test_empty_schedule() {
        assert!(!has_conflict(Uuid::new_v4(), at(10, 0), at(11, 0), &[]));
    }
}
