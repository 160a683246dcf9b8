//! Mentorship request workflow: sending requests and answering them.
//!
//! The coordinator runs each operation inside one storage transaction. All
//! invariant checks happen before any write, and any early return drops the
//! transaction, which must discard every staged write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, Result};
use crate::models::{
    MentorshipRequest, NewSession, Principal, RequestDecision, RequestStatus, RespondRequest,
    RespondResponse, SendRequestRequest, Session, User,
};
use crate::services::conflict::find_conflict;

/// Storage that can open scheduling transactions.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    type Tx: SchedulingTx;

    async fn begin(&self) -> Result<Self::Tx>;
}

/// A unit of work against scheduling storage.
///
/// Dropping a transaction without calling [`SchedulingTx::commit`] rolls it back.
#[async_trait]
pub trait SchedulingTx: Send {
    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>>;

    async fn find_pending_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
    ) -> Result<Option<MentorshipRequest>>;

    /// Inserts a PENDING request. Fails with `Conflict` if one already exists for the pair.
    async fn insert_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
        message: Option<String>,
    ) -> Result<MentorshipRequest>;

    /// Reads a request and holds it against concurrent modification until the
    /// transaction ends.
    async fn lock_request(&mut self, request_id: Uuid) -> Result<Option<MentorshipRequest>>;

    /// Serializes concurrent bookings for one mentor.
    async fn lock_mentor_schedule(&mut self, mentor_id: Uuid) -> Result<()>;

    async fn scheduled_sessions_for_mentor(&mut self, mentor_id: Uuid) -> Result<Vec<Session>>;

    /// Moves a PENDING request to `status`. Fails with `Conflict` if it is no longer PENDING.
    async fn set_request_status(
        &mut self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<MentorshipRequest>;

    /// Inserts a SCHEDULED session. Fails with `Conflict` if it overlaps another
    /// SCHEDULED session of the same mentor.
    async fn insert_session(&mut self, session: NewSession) -> Result<Session>;

    async fn commit(self) -> Result<()>;
}

/// Drives the PENDING → ACCEPTED | REJECTED workflow over a [`SchedulingStore`].
#[derive(Debug, Clone)]
pub struct SchedulingCoordinator<S> {
    store: S,
}

impl<S: SchedulingStore> SchedulingCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a PENDING request from a mentee to a mentor.
    pub async fn send_request(
        &self,
        principal: &Principal,
        payload: SendRequestRequest,
    ) -> Result<MentorshipRequest> {
        if !principal.is_mentee() {
            return Err(DomainError::Forbidden(
                "Only mentees can send mentorship requests.".to_string(),
            ));
        }
        payload.validate()?;

        let mentee_id = principal.user_id;
        let mentor_id = payload.mentor_id;
        if mentor_id == mentee_id {
            return Err(DomainError::invalid("You cannot send a request to yourself."));
        }

        let mut tx = self.store.begin().await?;

        match tx.find_user(mentor_id).await? {
            Some(user) if user.is_mentor() => {}
            _ => return Err(DomainError::invalid("Target user is not a mentor.")),
        }

        if tx.find_pending_request(mentor_id, mentee_id).await?.is_some() {
            return Err(DomainError::conflict(
                "A pending request to this mentor already exists.",
            ));
        }

        let request = tx.insert_request(mentor_id, mentee_id, payload.message).await?;
        tx.commit().await?;

        info!(
            request_id = %request.id,
            mentor_id = %mentor_id,
            mentee_id = %mentee_id,
            "Mentorship request sent"
        );

        Ok(request)
    }

    /// Accepts or rejects a request on behalf of its mentor.
    ///
    /// Acceptance books a session. If the proposed slot overlaps one of the
    /// mentor's SCHEDULED sessions the call fails with `Conflict` and the
    /// request stays PENDING.
    pub async fn respond(
        &self,
        principal: &Principal,
        request_id: Uuid,
        payload: RespondRequest,
    ) -> Result<RespondResponse> {
        if !principal.is_mentor() {
            return Err(DomainError::Forbidden(
                "Only mentors can respond to mentorship requests.".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;

        // Another mentor's request is reported as missing.
        let request = tx
            .lock_request(request_id)
            .await?
            .filter(|r| r.mentor_id == principal.user_id)
            .ok_or_else(|| DomainError::NotFound("Request not found.".to_string()))?;

        payload.validate()?;
        let decision = payload.decision()?;
        let booking = match decision {
            RequestDecision::Accept => Some(payload.booking()?),
            RequestDecision::Reject => None,
        };

        if request.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "Request has already been {}.",
                request.status
            )));
        }

        let session = match booking {
            Some((scheduled_time, duration)) => {
                let new_session = NewSession {
                    mentor_id: request.mentor_id,
                    mentee_id: request.mentee_id,
                    scheduled_time,
                    duration,
                    topic: payload.topic,
                    comments: payload.comments,
                };
                Some(book_session(&mut tx, request.id, new_session).await?)
            }
            None => None,
        };

        let updated = tx
            .set_request_status(request.id, decision.resulting_status())
            .await?;
        tx.commit().await?;

        info!(
            request_id = %updated.id,
            mentor_id = %updated.mentor_id,
            status = %updated.status,
            session_id = ?session.as_ref().map(|s| s.id),
            "Mentorship request answered"
        );

        Ok(RespondResponse {
            request: updated,
            session,
        })
    }
}

async fn book_session<T: SchedulingTx>(
    tx: &mut T,
    request_id: Uuid,
    new_session: NewSession,
) -> Result<Session> {
    let mentor_id = new_session.mentor_id;
    let start: DateTime<Utc> = new_session.scheduled_time;
    let end = new_session.end_time();

    tx.lock_mentor_schedule(mentor_id).await?;
    let existing = tx.scheduled_sessions_for_mentor(mentor_id).await?;

    if let Some(blocking) = find_conflict(mentor_id, start, end, &existing) {
        warn!(
            request_id = %request_id,
            mentor_id = %mentor_id,
            blocking_session_id = %blocking.id,
            "Mentor not available at proposed time"
        );
        return Err(DomainError::conflict("Mentor not available at this timeslot."));
    }

    tx.insert_session(new_session).await
}
