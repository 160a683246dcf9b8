//! PostgreSQL implementation of the scheduling store.
//!
//! Each coordinator operation runs in one transaction. Concurrent accepts for
//! the same mentor are serialized by locking the mentor's `users` row; the
//! partial unique index and the `sessions_no_overlap` exclusion constraint
//! back up the in-transaction checks.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use domain::error::Result;
use domain::models::{MentorshipRequest, NewSession, RequestStatus, Session, User};
use domain::services::{SchedulingStore, SchedulingTx};
use domain::DomainError;

use crate::entities::{MentorshipRequestEntity, RequestStatusDb, SessionEntity, UserEntity};
use crate::error::{map_db_conflict, map_db_error};
use crate::metrics::QueryTimer;

/// Scheduling store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgSchedulingStore {
    pool: PgPool,
}

impl PgSchedulingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulingStore for PgSchedulingStore {
    type Tx = PgSchedulingTx;

    async fn begin(&self) -> Result<Self::Tx> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(PgSchedulingTx { tx })
    }
}

/// An open scheduling transaction. Rolled back on drop unless committed.
pub struct PgSchedulingTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SchedulingTx for PgSchedulingTx {
    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>> {
        let timer = QueryTimer::new("tx_find_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, display_name, role_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *self.tx)
        .await;
        timer.record();
        Ok(result.map_err(map_db_error)?.map(Into::into))
    }

    async fn find_pending_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
    ) -> Result<Option<MentorshipRequest>> {
        let timer = QueryTimer::new("tx_find_pending_request");
        let result = sqlx::query_as::<_, MentorshipRequestEntity>(
            r#"
            SELECT id, mentor_id, mentee_id, message, status, created_at, updated_at
            FROM mentorship_requests
            WHERE mentor_id = $1 AND mentee_id = $2 AND status = 'pending'
            "#,
        )
        .bind(mentor_id)
        .bind(mentee_id)
        .fetch_optional(&mut *self.tx)
        .await;
        timer.record();
        Ok(result.map_err(map_db_error)?.map(Into::into))
    }

    async fn insert_request(
        &mut self,
        mentor_id: Uuid,
        mentee_id: Uuid,
        message: Option<String>,
    ) -> Result<MentorshipRequest> {
        let timer = QueryTimer::new("tx_insert_request");
        let result = sqlx::query_as::<_, MentorshipRequestEntity>(
            r#"
            INSERT INTO mentorship_requests (mentor_id, mentee_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, mentor_id, mentee_id, message, status, created_at, updated_at
            "#,
        )
        .bind(mentor_id)
        .bind(mentee_id)
        .bind(message)
        .fetch_one(&mut *self.tx)
        .await;
        timer.record();
        result
            .map(Into::into)
            .map_err(|e| map_db_conflict(e, "A pending request to this mentor already exists."))
    }

    async fn lock_request(&mut self, request_id: Uuid) -> Result<Option<MentorshipRequest>> {
        let timer = QueryTimer::new("tx_lock_request");
        let result = sqlx::query_as::<_, MentorshipRequestEntity>(
            r#"
            SELECT id, mentor_id, mentee_id, message, status, created_at, updated_at
            FROM mentorship_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(request_id)
        .fetch_optional(&mut *self.tx)
        .await;
        timer.record();
        Ok(result.map_err(map_db_error)?.map(Into::into))
    }

    async fn lock_mentor_schedule(&mut self, mentor_id: Uuid) -> Result<()> {
        let timer = QueryTimer::new("tx_lock_mentor_schedule");
        let result = sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(mentor_id)
            .fetch_optional(&mut *self.tx)
            .await;
        timer.record();
        result.map_err(map_db_error)?;
        Ok(())
    }

    async fn scheduled_sessions_for_mentor(&mut self, mentor_id: Uuid) -> Result<Vec<Session>> {
        let timer = QueryTimer::new("tx_scheduled_sessions_for_mentor");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT id, mentor_id, mentee_id, scheduled_time, end_time, duration, status,
                   topic, comments, created_at
            FROM sessions
            WHERE mentor_id = $1 AND status = 'scheduled'
            ORDER BY scheduled_time
            "#,
        )
        .bind(mentor_id)
        .fetch_all(&mut *self.tx)
        .await;
        timer.record();
        Ok(result
            .map_err(map_db_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn set_request_status(
        &mut self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<MentorshipRequest> {
        let timer = QueryTimer::new("tx_set_request_status");
        let result = sqlx::query_as::<_, MentorshipRequestEntity>(
            r#"
            UPDATE mentorship_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, mentor_id, mentee_id, message, status, created_at, updated_at
            "#,
        )
        .bind(request_id)
        .bind(RequestStatusDb::from(status))
        .fetch_optional(&mut *self.tx)
        .await;
        timer.record();
        result
            .map_err(map_db_error)?
            .map(Into::into)
            .ok_or_else(|| DomainError::conflict("Request is no longer pending."))
    }

    async fn insert_session(&mut self, session: NewSession) -> Result<Session> {
        let end_time = session.end_time();
        let timer = QueryTimer::new("tx_insert_session");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            INSERT INTO sessions
                (mentor_id, mentee_id, scheduled_time, end_time, duration, topic, comments)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, mentor_id, mentee_id, scheduled_time, end_time, duration, status,
                      topic, comments, created_at
            "#,
        )
        .bind(session.mentor_id)
        .bind(session.mentee_id)
        .bind(session.scheduled_time)
        .bind(end_time)
        .bind(session.duration)
        .bind(session.topic)
        .bind(session.comments)
        .fetch_one(&mut *self.tx)
        .await;
        timer.record();
        result
            .map(Into::into)
            .map_err(|e| map_db_conflict(e, "Mentor not available at this timeslot."))
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
