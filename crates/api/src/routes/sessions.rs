//! Session listing handler.

use axum::{extract::State, Json};
use persistence::repositories::SessionRepository;

use domain::models::Session;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Sessions of the caller, as mentor if they hold the mentor role and as
/// mentee otherwise, earliest first.
///
/// GET /api/v1/sessions
pub async fn list_my_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Session>>, ApiError> {
    let repo = SessionRepository::new(state.pool.clone());

    let entities = if auth.principal().is_mentor() {
        repo.list_for_mentor(auth.user_id).await?
    } else {
        repo.list_for_mentee(auth.user_id).await?
    };

    Ok(Json(entities.into_iter().map(Session::from).collect()))
}
