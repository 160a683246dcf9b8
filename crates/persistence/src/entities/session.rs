//! Session entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Session, SessionStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
pub enum SessionStatusDb {
    Scheduled,
    Completed,
    Cancelled,
}

impl From<SessionStatusDb> for SessionStatus {
    fn from(status: SessionStatusDb) -> Self {
        match status {
            SessionStatusDb::Scheduled => SessionStatus::Scheduled,
            SessionStatusDb::Completed => SessionStatus::Completed,
            SessionStatusDb::Cancelled => SessionStatus::Cancelled,
        }
    }
}

/// Database row mapping for the sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: i32,
    pub status: SessionStatusDb,
    pub topic: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SessionEntity> for Session {
    fn from(entity: SessionEntity) -> Self {
        Self {
            id: entity.id,
            mentor_id: entity.mentor_id,
            mentee_id: entity.mentee_id,
            scheduled_time: entity.scheduled_time,
            end_time: entity.end_time,
            duration: entity.duration,
            status: entity.status.into(),
            topic: entity.topic,
            comments: entity.comments,
            created_at: entity.created_at,
        }
    }
}
