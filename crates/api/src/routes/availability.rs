//! Mentor availability endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::entities::{rules_from_entities, AvailabilityEntity};
use persistence::repositories::AvailabilityRepository;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use domain::models::{
    AvailabilityResponse, CreateAvailabilityRequest, MentorSlotsResponse, RecurrenceRule,
    SlotRangeQuery, StoredAvailability, UpdateAvailabilityRequest,
};
use domain::services::{expand, group_by_date};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_availability_change;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn require_mentor(auth: &AuthUser) -> Result<(), ApiError> {
    if auth.principal().is_mentor() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only mentors can manage availability.".to_string(),
        ))
    }
}

/// Loads a rule row and checks that `auth` owns it.
async fn find_owned(
    repo: &AvailabilityRepository,
    auth: &AuthUser,
    id: Uuid,
) -> Result<AvailabilityEntity, ApiError> {
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Availability not found".to_string()))?;

    if entity.user_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "You can only modify your own availability.".to_string(),
        ));
    }

    Ok(entity)
}

/// Create an availability rule for the calling mentor.
///
/// POST /api/v1/availability
pub async fn create_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateAvailabilityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AvailabilityResponse>), ApiError> {
    require_mentor(&auth)?;

    let Json(request) = payload?;
    let new_rule = request.into_new_rule(auth.user_id)?;

    let repo = AvailabilityRepository::new(state.pool.clone());
    let rule = RecurrenceRule::try_from(repo.create(&new_rule).await?)?;

    info!(
        availability_id = %rule.id,
        mentor_id = %rule.owner_id,
        recurrence_type = %rule.recurrence.kind(),
        "Availability created"
    );
    record_availability_change("created");

    Ok((StatusCode::CREATED, Json(rule.into())))
}

/// Partially update one of the caller's rules.
///
/// PUT /api/v1/availability/:id
pub async fn update_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    require_mentor(&auth)?;

    let repo = AvailabilityRepository::new(state.pool.clone());
    let existing = StoredAvailability::from(find_owned(&repo, &auth, id).await?);

    let Json(request) = payload?;
    let merged = request.apply_to(&existing)?;

    let entity = repo
        .update(&merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Availability not found".to_string()))?;
    let rule = RecurrenceRule::try_from(entity)?;

    info!(availability_id = %rule.id, mentor_id = %rule.owner_id, "Availability updated");
    record_availability_change("updated");

    Ok(Json(rule.into()))
}

/// Soft-delete one of the caller's rules.
///
/// DELETE /api/v1/availability/:id
pub async fn delete_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_mentor(&auth)?;

    let repo = AvailabilityRepository::new(state.pool.clone());
    find_owned(&repo, &auth, id).await?;

    if !repo.deactivate(id).await? {
        return Err(ApiError::NotFound("Availability not found".to_string()));
    }

    info!(availability_id = %id, mentor_id = %auth.user_id, "Availability deleted");
    record_availability_change("deleted");

    Ok(Json(MessageResponse {
        message: "Availability deleted".to_string(),
    }))
}

/// Concrete slots of a mentor between `from` and `to`, grouped by date.
///
/// GET /api/v1/availability/mentor/:id?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn get_mentor_slots(
    State(state): State<AppState>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<SlotRangeQuery>,
) -> Result<Json<MentorSlotsResponse>, ApiError> {
    let (from, to) = query.resolve()?;
    if from > to {
        return Ok(Json(MentorSlotsResponse::default()));
    }

    let repo = AvailabilityRepository::new(state.pool.clone());
    let rules = rules_from_entities(repo.list_active_for_owner(mentor_id).await?);
    let slots = expand(&rules, from, to);

    tracing::debug!(
        mentor_id = %mentor_id,
        rules = rules.len(),
        slots = slots.len(),
        "Expanded mentor availability"
    );

    Ok(Json(group_by_date(slots).into()))
}
