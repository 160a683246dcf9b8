//! Mentorship request endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use domain::models::{MentorshipRequest, RespondRequest, RespondResponse, SendRequestRequest};
use domain::DomainError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::{record_request_response, record_request_sent};

/// Send a mentorship request to a mentor.
///
/// POST /api/v1/request
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<SendRequestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MentorshipRequest>), ApiError> {
    let Json(request) = payload?;
    let created = state
        .scheduling
        .send_request(&auth.principal(), request)
        .await?;

    record_request_sent();

    Ok((StatusCode::CREATED, Json(created)))
}

/// Accept or reject a pending request addressed to the calling mentor.
///
/// PATCH /api/v1/request/:id/respond
pub async fn respond_to_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
    payload: Result<Json<RespondRequest>, JsonRejection>,
) -> Result<Json<RespondResponse>, ApiError> {
    let Json(body) = payload?;

    match state
        .scheduling
        .respond(&auth.principal(), request_id, body)
        .await
    {
        Ok(response) => {
            record_request_response(if response.session.is_some() {
                "accepted"
            } else {
                "rejected"
            });
            Ok(Json(response))
        }
        Err(err) => {
            if matches!(err, DomainError::Conflict(_)) {
                record_request_response("conflict");
            }
            Err(err.into())
        }
    }
}
