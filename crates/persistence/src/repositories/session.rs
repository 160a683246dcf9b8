//! Session repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SessionEntity;
use crate::metrics::QueryTimer;

/// Repository for read access to sessions. Sessions are only created by the
/// scheduling store.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new SessionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Sessions where the user is the mentor, by start time.
    pub async fn list_for_mentor(&self, mentor_id: Uuid) -> Result<Vec<SessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_sessions_for_mentor");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT id, mentor_id, mentee_id, scheduled_time, end_time, duration, status,
                   topic, comments, created_at
            FROM sessions
            WHERE mentor_id = $1
            ORDER BY scheduled_time ASC
            "#,
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Sessions where the user is the mentee, by start time.
    pub async fn list_for_mentee(&self, mentee_id: Uuid) -> Result<Vec<SessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_sessions_for_mentee");
        let result = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT id, mentor_id, mentee_id, scheduled_time, end_time, duration, status,
                   topic, comments, created_at
            FROM sessions
            WHERE mentee_id = $1
            ORDER BY scheduled_time ASC
            "#,
        )
        .bind(mentee_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
