//! Mentorship request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{MentorshipRequest, RequestStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for mentorship request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "mentorship_request_status", rename_all = "lowercase")]
pub enum RequestStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<RequestStatus> for RequestStatusDb {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => RequestStatusDb::Pending,
            RequestStatus::Accepted => RequestStatusDb::Accepted,
            RequestStatus::Rejected => RequestStatusDb::Rejected,
        }
    }
}

impl From<RequestStatusDb> for RequestStatus {
    fn from(status: RequestStatusDb) -> Self {
        match status {
            RequestStatusDb::Pending => RequestStatus::Pending,
            RequestStatusDb::Accepted => RequestStatus::Accepted,
            RequestStatusDb::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Database row mapping for the mentorship_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct MentorshipRequestEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub message: Option<String>,
    pub status: RequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MentorshipRequestEntity> for MentorshipRequest {
    fn from(entity: MentorshipRequestEntity) -> Self {
        Self {
            id: entity.id,
            mentor_id: entity.mentor_id,
            mentee_id: entity.mentee_id,
            message: entity.message,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
