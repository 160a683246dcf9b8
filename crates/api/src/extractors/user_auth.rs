//! Authenticated principal extractor.
//!
//! Validates the Bearer access token and resolves the caller's role from the
//! users table. Handlers receive an [`AuthUser`] and hand its
//! [`Principal`] to the domain.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use domain::models::Principal;
use persistence::repositories::UserRepository;
use shared::jwt::{extract_user_id, JwtConfig};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// The acting user of a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role_name: String,
    /// JWT ID of the presented token.
    pub jti: String,
}

impl AuthUser {
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role_name.clone())
    }
}

/// Extracts the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

fn authenticate(jwt: &JwtConfig, token: &str) -> Result<(Uuid, String), ApiError> {
    let claims = jwt.validate_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;
    let user_id = extract_user_id(&claims)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;
    Ok((user_id, claims.jti))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let (user_id, jti) = authenticate(&state.jwt, token)?;

        let user = UserRepository::new(state.pool.clone())
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            role_name: user.role_name,
            jti,
        })
    }
}
