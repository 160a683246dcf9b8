//! Mentorship request domain models for the request/accept workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, Result};
use crate::models::session::Session;

/// Status of a mentorship request. `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "PENDING"),
            RequestStatus::Accepted => write!(f, "ACCEPTED"),
            RequestStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// The mentor's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Accept,
    Reject,
}

impl RequestDecision {
    /// Parses the `status` field of a respond payload.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACCEPTED" => Some(RequestDecision::Accept),
            "REJECTED" => Some(RequestDecision::Reject),
            _ => None,
        }
    }

    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            RequestDecision::Accept => RequestStatus::Accepted,
            RequestDecision::Reject => RequestStatus::Rejected,
        }
    }
}

/// A mentee's request to be mentored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipRequest {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for sending a mentorship request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestRequest {
    pub mentor_id: Uuid,

    #[validate(length(max = 2000, message = "message must be at most 2000 characters"))]
    pub message: Option<String>,
}

/// Request payload for answering a mentorship request.
///
/// `status` and `scheduled_time` stay textual so that malformed values are
/// reported as invalid arguments rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub status: String,

    pub scheduled_time: Option<String>,

    /// Session length in minutes.
    pub duration: Option<i32>,

    #[validate(length(max = 2000, message = "comments must be at most 2000 characters"))]
    pub comments: Option<String>,

    #[validate(length(max = 255, message = "topic must be at most 255 characters"))]
    pub topic: Option<String>,
}

impl RespondRequest {
    pub fn decision(&self) -> Result<RequestDecision> {
        RequestDecision::parse(&self.status).ok_or_else(|| {
            DomainError::invalid("Invalid status. Must be 'ACCEPTED' or 'REJECTED'.")
        })
    }

    /// Start instant and duration of the session to book on acceptance.
    pub fn booking(&self) -> Result<(DateTime<Utc>, i32)> {
        let (Some(scheduled_time), Some(duration)) = (self.scheduled_time.as_deref(), self.duration)
        else {
            return Err(DomainError::invalid(
                "Scheduled time and duration are required when accepting a request.",
            ));
        };

        let scheduled_time = DateTime::parse_from_rfc3339(scheduled_time)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| {
                DomainError::invalid("scheduledTime must be an RFC 3339 timestamp")
            })?;

        if duration <= 0 {
            return Err(DomainError::invalid("duration must be a positive number of minutes"));
        }

        Ok((scheduled_time, duration))
    }
}

/// Result of answering a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResponse {
    pub request: MentorshipRequest,
    pub session: Option<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn respond(status: &str, scheduled_time: Option<&str>, duration: Option<i32>) -> RespondRequest {
        RespondRequest {
            status: status.to_string(),
            scheduled_time: scheduled_time.map(String::from),
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!(RequestDecision::parse("ACCEPTED"), Some(RequestDecision::Accept));
        assert_eq!(RequestDecision::parse("REJECTED"), Some(RequestDecision::Reject));
        assert_eq!(RequestDecision::parse("PENDING"), None);
        assert_eq!(RequestDecision::parse("accepted"), None);
    }

    #[test]
    fn test_invalid_decision() {
        assert_eq!(
            respond("MAYBE", None, None).decision().unwrap_err(),
            DomainError::invalid("Invalid status. Must be 'ACCEPTED' or 'REJECTED'.")
        );
    }

    #[test]
    fn test_booking_requires_time_and_duration() {
        let err = respond("ACCEPTED", Some("2024-01-08T10:00:00Z"), None)
            .booking()
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid(
                "Scheduled time and duration are required when accepting a request."
            )
        );
    }

    #[test]
    fn test_booking_parses_offsets() {
        let (start, duration) = respond("ACCEPTED", Some("2024-01-08T12:00:00+02:00"), Some(45))
            .booking()
            .unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap());
        assert_eq!(duration, 45);
    }

    #[test]
    fn test_booking_rejects_bad_values() {
        assert!(respond("ACCEPTED", Some("next tuesday"), Some(30))
            .booking()
            .is_err());
        assert!(respond("ACCEPTED", Some("2024-01-08T10:00:00Z"), Some(0))
            .booking()
            .is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_respond_payload_deserialization() {
        let req: RespondRequest = serde_json::from_str(
            r#"{"status":"ACCEPTED","scheduledTime":"2024-01-08T10:00:00Z","duration":60,"topic":"Career"}"#,
        )
        .unwrap();
        assert_eq!(req.decision().unwrap(), RequestDecision::Accept);
        assert_eq!(req.duration, Some(60));
        assert_eq!(req.topic.as_deref(), Some("Career"));
    }

    #[test]
    fn test_respond_response_keeps_null_session() {
        let response = RespondResponse {
            request: MentorshipRequest {
                id: Uuid::nil(),
                mentor_id: Uuid::nil(),
                mentee_id: Uuid::nil(),
                message: None,
                status: RequestStatus::Rejected,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            session: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["session"].is_null());
        assert_eq!(json["request"]["status"], "REJECTED");
    }
}
