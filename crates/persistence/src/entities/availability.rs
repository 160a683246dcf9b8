//! Availability rule entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Recurrence, RecurrenceKind, RecurrenceRule, StoredAvailability};
use domain::DomainError;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

/// Database enum for recurrence kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "recurrence_kind")]
pub enum RecurrenceKindDb {
    #[sqlx(rename = "one-off")]
    OneOff,
    #[sqlx(rename = "weekly")]
    Weekly,
    #[sqlx(rename = "daily")]
    Daily,
}

impl From<RecurrenceKind> for RecurrenceKindDb {
    fn from(kind: RecurrenceKind) -> Self {
        match kind {
            RecurrenceKind::OneOff => RecurrenceKindDb::OneOff,
            RecurrenceKind::Weekly => RecurrenceKindDb::Weekly,
            RecurrenceKind::Daily => RecurrenceKindDb::Daily,
        }
    }
}

impl From<RecurrenceKindDb> for RecurrenceKind {
    fn from(kind: RecurrenceKindDb) -> Self {
        match kind {
            RecurrenceKindDb::OneOff => RecurrenceKind::OneOff,
            RecurrenceKindDb::Weekly => RecurrenceKind::Weekly,
            RecurrenceKindDb::Daily => RecurrenceKind::Daily,
        }
    }
}

/// Flat column values of a recurrence, as written to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceColumns {
    pub recurrence_type: RecurrenceKindDb,
    pub day_of_week: Option<i16>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<&Recurrence> for RecurrenceColumns {
    fn from(recurrence: &Recurrence) -> Self {
        let window = recurrence.window().unwrap_or_default();
        Self {
            recurrence_type: recurrence.kind().into(),
            day_of_week: recurrence.day_of_week(),
            date: recurrence.date(),
            start_date: window.start,
            end_date: window.end,
        }
    }
}

/// Database row mapping for the mentor_availability table.
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recurrence_type: RecurrenceKindDb,
    pub day_of_week: Option<i16>,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub timezone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AvailabilityEntity> for StoredAvailability {
    fn from(entity: AvailabilityEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.user_id,
            kind: entity.recurrence_type.into(),
            day_of_week: entity.day_of_week,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            start_date: entity.start_date,
            end_date: entity.end_date,
            timezone: entity.timezone,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl TryFrom<AvailabilityEntity> for RecurrenceRule {
    type Error = DomainError;

    fn try_from(entity: AvailabilityEntity) -> Result<Self, Self::Error> {
        RecurrenceRule::try_from(StoredAvailability::from(entity))
    }
}

/// Converts stored rows, skipping any whose columns do not form a valid rule.
pub fn rules_from_entities(entities: Vec<AvailabilityEntity>) -> Vec<RecurrenceRule> {
    entities
        .into_iter()
        .filter_map(|entity| {
            let id = entity.id;
            match RecurrenceRule::try_from(entity) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(availability_id = %id, error = %e, "Skipping malformed availability rule");
                    None
                }
            }
        })
        .collect()
}
