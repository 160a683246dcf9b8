//! Mentoring session domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Scheduled => write!(f, "SCHEDULED"),
            SessionStatus::Completed => write!(f, "COMPLETED"),
            SessionStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A booked meeting between a mentor and a mentee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Length in minutes.
    pub duration: i32,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a session about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub duration: i32,
    pub topic: Option<String>,
    pub comments: Option<String>,
}

impl NewSession {
    /// `scheduled_time + duration`.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.scheduled_time + Duration::minutes(i64::from(self.duration))
    }

    /// Materializes the session as SCHEDULED.
    pub fn into_session(self, id: Uuid, created_at: DateTime<Utc>) -> Session {
        let end_time = self.end_time();
        Session {
            id,
            mentor_id: self.mentor_id,
            mentee_id: self.mentee_id,
            scheduled_time: self.scheduled_time,
            end_time,
            duration: self.duration,
            status: SessionStatus::Scheduled,
            topic: self.topic,
            comments: self.comments,
            created_at,
        }
    }
}
