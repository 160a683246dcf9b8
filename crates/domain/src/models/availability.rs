//! Mentor availability domain models.
//!
//! A mentor publishes [`RecurrenceRule`]s; the slot expander turns them into
//! [`ExpandedSlot`]s for a date range. Times of day are kept as the text the
//! mentor supplied and echoed back verbatim.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{DomainError, Result};
use shared::time::parse_date;
use shared::validation::validate_time_range;

/// Discriminator for the three recurrence shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurrenceKind {
    #[serde(rename = "one-off")]
    OneOff,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "daily")]
    Daily,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::OneOff => "one-off",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Daily => "daily",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "one-off" => Some(RecurrenceKind::OneOff),
            "weekly" => Some(RecurrenceKind::Weekly),
            "daily" => Some(RecurrenceKind::Daily),
            _ => None,
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional calendar bounds restricting the instances of a repeating rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Fills missing bounds from the query range.
    pub fn resolve(&self, from: NaiveDate, to: NaiveDate) -> (NaiveDate, NaiveDate) {
        (self.start.unwrap_or(from), self.end.unwrap_or(to))
    }
}

/// When a rule applies. Each variant carries exactly the fields its kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    OneOff { date: NaiveDate },
    /// `day_of_week`: 0 = Sunday .. 6 = Saturday.
    Weekly { day_of_week: u8, window: DateWindow },
    Daily { window: DateWindow },
}

impl Recurrence {
    /// Builds a recurrence from flat, possibly partial, fields.
    ///
    /// Fields that do not belong to `kind` are ignored.
    pub fn from_parts(
        kind: RecurrenceKind,
        day_of_week: Option<i16>,
        date: Option<NaiveDate>,
        window: DateWindow,
    ) -> Result<Self> {
        match kind {
            RecurrenceKind::OneOff => date
                .map(|date| Recurrence::OneOff { date })
                .ok_or_else(|| {
                    DomainError::invalid("date is required for one-off availability (YYYY-MM-DD)")
                }),
            RecurrenceKind::Weekly => {
                let day = day_of_week.ok_or_else(|| {
                    DomainError::invalid("dayOfWeek is required for weekly availability (0-6)")
                })?;
                let day_of_week = u8::try_from(day)
                    .ok()
                    .filter(|d| *d <= 6)
                    .ok_or_else(|| DomainError::invalid("dayOfWeek must be between 0 and 6"))?;
                Ok(Recurrence::Weekly {
                    day_of_week,
                    window,
                })
            }
            RecurrenceKind::Daily => Ok(Recurrence::Daily { window }),
        }
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            Recurrence::OneOff { .. } => RecurrenceKind::OneOff,
            Recurrence::Weekly { .. } => RecurrenceKind::Weekly,
            Recurrence::Daily { .. } => RecurrenceKind::Daily,
        }
    }

    pub fn day_of_week(&self) -> Option<i16> {
        match self {
            Recurrence::Weekly { day_of_week, .. } => Some(i16::from(*day_of_week)),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Recurrence::OneOff { date } => Some(*date),
            _ => None,
        }
    }

    /// The window of a repeating rule; one-off rules have none.
    pub fn window(&self) -> Option<DateWindow> {
        match self {
            Recurrence::Weekly { window, .. } | Recurrence::Daily { window } => Some(*window),
            Recurrence::OneOff { .. } => None,
        }
    }
}

/// A mentor-declared availability pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub recurrence: Recurrence,
    pub start_time: String,
    pub end_time: String,
    pub timezone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values of a stored rule. Older rows may not form a valid
/// [`Recurrence`], so updates merge against this shape rather than a
/// [`RecurrenceRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAvailability {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub kind: RecurrenceKind,
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

impl TryFrom<StoredAvailability> for RecurrenceRule {
    type Error = DomainError;

    fn try_from(stored: StoredAvailability) -> Result<Self> {
        let recurrence = Recurrence::from_parts(
            stored.kind,
            stored.day_of_week,
            stored.date,
            DateWindow::new(stored.start_date, stored.end_date),
        )?;

        Ok(Self {
            id: stored.id,
            owner_id: stored.owner_id,
            recurrence,
            start_time: stored.start_time,
            end_time: stored.end_time,
            timezone: stored.timezone,
            is_active: stored.is_active,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

/// A validated rule ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecurrenceRule {
    pub owner_id: Uuid,
    pub recurrence: Recurrence,
    pub start_time: String,
    pub end_time: String,
    pub timezone: Option<String>,
}

/// One concrete dated occurrence of a rule. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedSlot {
    #[serde(rename = "availabilityId")]
    pub rule_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub timezone: Option<String>,
}

/// A slot inside a per-date group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub availability_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub timezone: Option<String>,
}

impl From<ExpandedSlot> for SlotEntry {
    fn from(slot: ExpandedSlot) -> Self {
        Self {
            availability_id: slot.rule_id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            timezone: slot.timezone,
        }
    }
}

/// Response for a mentor's slots, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSlotsResponse {
    pub slots_by_date: BTreeMap<String, Vec<SlotEntry>>,
}

impl From<BTreeMap<NaiveDate, Vec<SlotEntry>>> for MentorSlotsResponse {
    fn from(grouped: BTreeMap<NaiveDate, Vec<SlotEntry>>) -> Self {
        Self {
            slots_by_date: grouped
                .into_iter()
                .map(|(date, slots)| (date.to_string(), slots))
                .collect(),
        }
    }
}

/// Query parameters for listing a mentor's slots.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SlotRangeQuery {
    /// Both bounds are required and must be `YYYY-MM-DD`.
    pub fn resolve(&self) -> Result<(NaiveDate, NaiveDate)> {
        let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) else {
            return Err(DomainError::invalid(
                "Provide 'from' and 'to' query params in YYYY-MM-DD format",
            ));
        };

        match (parse_date(from), parse_date(to)) {
            (Some(from), Some(to)) => Ok((from, to)),
            _ => Err(DomainError::invalid(
                "Invalid 'from' or 'to' date (expected YYYY-MM-DD)",
            )),
        }
    }
}

fn default_recurrence_type() -> String {
    RecurrenceKind::OneOff.as_str().to_string()
}

fn validate_recurrence_type(value: &str) -> std::result::Result<(), ValidationError> {
    if RecurrenceKind::parse(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("recurrence_type");
        err.message = Some("Invalid recurrenceType".into());
        Err(err)
    }
}

fn optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_date)
}

/// Keeps an explicit JSON `null` as `Some(None)`; an absent key stays `None`
/// through `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `None` keeps `existing`, `Some(None)` clears, `Some(Some(_))` sets.
fn merge_date(
    update: Option<Option<String>>,
    existing: Option<NaiveDate>,
) -> Result<Option<NaiveDate>> {
    match update {
        None => Ok(existing),
        Some(None) => Ok(None),
        Some(Some(text)) => {
            shared::validation::validate_calendar_date(&text)?;
            Ok(parse_date(&text))
        }
    }
}

const MAX_TIMEZONE_LEN: usize = 64;

/// Request payload for creating an availability rule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRequest {
    #[serde(default = "default_recurrence_type")]
    #[validate(custom(function = "validate_recurrence_type"))]
    pub recurrence_type: String,

    pub day_of_week: Option<i16>,

    #[validate(custom(function = "shared::validation::validate_calendar_date"))]
    pub date: Option<String>,

    pub start_time: Option<String>,

    pub end_time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_calendar_date"))]
    pub start_date: Option<String>,

    #[validate(custom(function = "shared::validation::validate_calendar_date"))]
    pub end_date: Option<String>,

    #[validate(length(max = 64, message = "timezone must be at most 64 characters"))]
    pub timezone: Option<String>,
}

impl CreateAvailabilityRequest {
    /// Validates the payload and shapes it into a storable rule for `owner_id`.
    pub fn into_new_rule(self, owner_id: Uuid) -> Result<NewRecurrenceRule> {
        self.validate()?;

        let kind = RecurrenceKind::parse(&self.recurrence_type)
            .ok_or_else(|| DomainError::invalid("Invalid recurrenceType"))?;

        let (Some(start_time), Some(end_time)) = (self.start_time, self.end_time) else {
            return Err(DomainError::invalid("startTime and endTime are required"));
        };
        validate_time_range(&start_time, &end_time)?;

        let window = DateWindow::new(
            optional_date(self.start_date.as_deref()),
            optional_date(self.end_date.as_deref()),
        );
        let recurrence = Recurrence::from_parts(
            kind,
            self.day_of_week,
            optional_date(self.date.as_deref()),
            window,
        )?;

        Ok(NewRecurrenceRule {
            owner_id,
            recurrence,
            start_time,
            end_time,
            timezone: self.timezone.filter(|tz| !tz.is_empty()),
        })
    }
}

/// Request payload for a partial update of an availability rule.
///
/// Absent fields keep their stored value. `startDate`, `endDate` and
/// `timezone` may be sent as `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    #[validate(custom(function = "validate_recurrence_type"))]
    pub recurrence_type: Option<String>,

    pub day_of_week: Option<i16>,

    #[validate(custom(function = "shared::validation::validate_calendar_date"))]
    pub date: Option<String>,

    pub start_time: Option<String>,

    pub end_time: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub timezone: Option<Option<String>>,

    pub is_active: Option<bool>,
}

impl UpdateAvailabilityRequest {
    /// Merges the payload over the stored columns and checks that the result
    /// forms a valid rule.
    pub fn apply_to(self, existing: &StoredAvailability) -> Result<RecurrenceRule> {
        self.validate()?;

        let kind = match self.recurrence_type.as_deref() {
            Some(value) => RecurrenceKind::parse(value)
                .ok_or_else(|| DomainError::invalid("Invalid recurrenceType"))?,
            None => existing.kind,
        };

        let start_time = self.start_time.unwrap_or_else(|| existing.start_time.clone());
        let end_time = self.end_time.unwrap_or_else(|| existing.end_time.clone());
        validate_time_range(&start_time, &end_time)?;

        let timezone = match self.timezone {
            None => existing.timezone.clone(),
            Some(tz) => tz.filter(|tz| !tz.is_empty()),
        };
        if timezone
            .as_ref()
            .is_some_and(|tz| tz.chars().count() > MAX_TIMEZONE_LEN)
        {
            return Err(DomainError::invalid("timezone must be at most 64 characters"));
        }

        let window = DateWindow::new(
            merge_date(self.start_date, existing.start_date)?,
            merge_date(self.end_date, existing.end_date)?,
        );
        let recurrence = Recurrence::from_parts(
            kind,
            self.day_of_week.or(existing.day_of_week),
            optional_date(self.date.as_deref()).or(existing.date),
            window,
        )?;

        Ok(RecurrenceRule {
            id: existing.id,
            owner_id: existing.owner_id,
            recurrence,
            start_time,
            end_time,
            timezone,
            is_active: self.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        })
    }
}

/// Flat response shape for a stored rule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recurrence_type: RecurrenceKind,
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

impl From<RecurrenceRule> for AvailabilityResponse {
    fn from(rule: RecurrenceRule) -> Self {
        let window = rule.recurrence.window().unwrap_or_default();
        Self {
            id: rule.id,
            user_id: rule.owner_id,
            recurrence_type: rule.recurrence.kind(),
            day_of_week: rule.recurrence.day_of_week(),
            date: rule.recurrence.date(),
            start_time: rule.start_time,
            end_time: rule.end_time,
            start_date: window.start,
            end_date: window.end,
            timezone: rule.timezone,
            is_active: rule.is_active,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}
