//! In-memory [`SchedulingStore`] for development and testing.
//!
//! A transaction holds the store lock for its whole lifetime and works on a
//! private copy of the state; commit publishes the copy, drop discards it.
//! The pending-request and session-overlap constraints are enforced on insert
//! the same way the database enforces them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::models::{
    MentorshipRequest, NewSession, RequestStatus, Session, SessionStatus, User,
};
use crate::services::conflict::has_conflict;
use crate::services::scheduling::{SchedulingStore, SchedulingTx};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    requests: HashMap<Uuid, MentorshipRequest>,
    sessions: Vec<Session>,
}

/// Scheduling storage backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchedulingStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySchedulingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Seeds an existing session, bypassing the overlap constraint.
    pub async fn add_session(&self, session: Session) {
        self.state.lock().await.sessions.push(session);
    }

    pub async fn request(&self, request_id: Uuid) -> Option<MentorshipRequest> {
        self.state.lock().await.requests.get(&request_id).cloned()
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.state.lock().await.sessions.clone()
    }
}

#[async_trait]
impl SchedulingStore for InMemorySchedulingStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<Self::Tx> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTx { guard, staged })
    }
}

/// A transaction over [`InMemorySchedulingStore`].
pub struct InMemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl SchedulingTx for InMemoryTx {
    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.staged.users.get(&user_id).cloned())
    }

    async fn find_pending_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
    ) -> Result<Option<MentorshipRequest>> {
        Ok(self
            .staged
            .requests
            .values()
            .find(|r| {
                r.mentor_id == mentor_id
                    && r.mentee_id == mentee_id
                    && r.status == RequestStatus::Pending
            })
            .cloned())
    }

    async fn insert_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
        message: Option<String>,
    ) -> Result<MentorshipRequest> {
        if self.find_pending_request(mentor_id, mentee_id).await?.is_some() {
            return Err(DomainError::conflict("Resource already exists"));
        }

        let now = Utc::now();
        let request = MentorshipRequest {
            id: Uuid::new_v4(),
            mentor_id,
            mentee_id,
            message,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.staged.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn lock_request(&mut self, request_id: Uuid) -> Result<Option<MentorshipRequest>> {
        Ok(self.staged.requests.get(&request_id).cloned())
    }

    async fn lock_mentor_schedule(&mut self, _mentor_id: Uuid) -> Result<()> {
        // The store lock already serializes every transaction.
        Ok(())
    }

    async fn scheduled_sessions_for_mentor(&mut self, mentor_id: Uuid) -> Result<Vec<Session>> {
        Ok(self
            .staged
            .sessions
            .iter()
            .filter(|s| s.mentor_id == mentor_id && s.status == SessionStatus::Scheduled)
            .cloned()
            .collect())
    }

    async fn set_request_status(
        &mut self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<MentorshipRequest> {
        let request = self
            .staged
            .requests
            .get_mut(&request_id)
            .filter(|r| r.status == RequestStatus::Pending)
            .ok_or_else(|| DomainError::conflict("Request is no longer pending."))?;

        request.status = status;
        request.updated_at = Utc::now();
        Ok(request.clone())
    }

    async fn insert_session(&mut self, session: NewSession) -> Result<Session> {
        if has_conflict(
            session.mentor_id,
            session.scheduled_time,
            session.end_time(),
            &self.staged.sessions,
        ) {
            return Err(DomainError::conflict("Resource already exists"));
        }

        let session = session.into_session(Uuid::new_v4(), Utc::now());
        self.staged.sessions.push(session.clone());
        Ok(session)
    }

    async fn commit(mut self) -> Result<()> {
        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}
