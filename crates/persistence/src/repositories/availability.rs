//! Availability rule repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{NewRecurrenceRule, RecurrenceRule};

use crate::entities::{AvailabilityEntity, RecurrenceColumns};
use crate::metrics::QueryTimer;

/// Repository for mentor availability rules.
#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    /// Creates a new AvailabilityRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new active rule.
    pub async fn create(&self, rule: &NewRecurrenceRule) -> Result<AvailabilityEntity, sqlx::Error> {
        let columns = RecurrenceColumns::from(&rule.recurrence);
        let timer = QueryTimer::new("create_availability");
        let result = sqlx::query_as::<_, AvailabilityEntity>(
            r#"
            INSERT INTO mentor_availability
                (user_id, recurrence_type, day_of_week, date, start_time, end_time,
                 start_date, end_date, timezone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, recurrence_type, day_of_week, date, start_time, end_time,
                      start_date, end_date, timezone, is_active, created_at, updated_at
            "#,
        )
        .bind(rule.owner_id)
        .bind(columns.recurrence_type)
        .bind(columns.day_of_week)
        .bind(columns.date)
        .bind(&rule.start_time)
        .bind(&rule.end_time)
        .bind(columns.start_date)
        .bind(columns.end_date)
        .bind(&rule.timezone)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a rule by ID, active or not.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AvailabilityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_availability_by_id");
        let result = sqlx::query_as::<_, AvailabilityEntity>(
            r#"
            SELECT id, user_id, recurrence_type, day_of_week, date, start_time, end_time,
                   start_date, end_date, timezone, is_active, created_at, updated_at
            FROM mentor_availability
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite the mutable columns of a rule with `rule`.
    pub async fn update(&self, rule: &RecurrenceRule) -> Result<Option<AvailabilityEntity>, sqlx::Error> {
        let columns = RecurrenceColumns::from(&rule.recurrence);
        let timer = QueryTimer::new("update_availability");
        let result = sqlx::query_as::<_, AvailabilityEntity>(
            r#"
            UPDATE mentor_availability
            SET recurrence_type = $2,
                day_of_week = $3,
                date = $4,
                start_time = $5,
                end_time = $6,
                start_date = $7,
                end_date = $8,
                timezone = $9,
                is_active = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, recurrence_type, day_of_week, date, start_time, end_time,
                      start_date, end_date, timezone, is_active, created_at, updated_at
            "#,
        )
        .bind(rule.id)
        .bind(columns.recurrence_type)
        .bind(columns.day_of_week)
        .bind(columns.date)
        .bind(&rule.start_time)
        .bind(&rule.end_time)
        .bind(columns.start_date)
        .bind(columns.end_date)
        .bind(&rule.timezone)
        .bind(rule.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft delete. Returns false if the rule does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_availability");
        let result = sqlx::query(
            r#"
            UPDATE mentor_availability
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|r| r.rows_affected() > 0)
    }

    /// Active rules of one mentor, oldest first.
    pub async fn list_active_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<AvailabilityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_availability");
        let result = sqlx::query_as::<_, AvailabilityEntity>(
            r#"
            SELECT id, user_id, recurrence_type, day_of_week, date, start_time, end_time,
                   start_date, end_date, timezone, is_active, created_at, updated_at
            FROM mentor_availability
            WHERE user_id = $1 AND is_active
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
