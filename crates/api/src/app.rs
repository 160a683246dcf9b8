use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use persistence::repositories::PgSchedulingStore;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::SchedulingCoordinator;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{availability, health, requests, sessions};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub scheduling: SchedulingCoordinator<PgSchedulingStore>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let jwt = JwtConfig::from_rsa_pem(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.leeway_secs,
        )?;

        Ok(Self {
            scheduling: SchedulingCoordinator::new(PgSchedulingStore::new(pool.clone())),
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
        })
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let state = AppState::new(config, pool)?;
    Ok(router(state))
}

/// Builds the router around an existing state.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    // Empty origin list allows any origin (development).
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authentication is enforced per handler by the AuthUser extractor.
    let api_routes = Router::new()
        .route("/availability", post(availability::create_availability))
        .route(
            "/availability/:id",
            put(availability::update_availability).delete(availability::delete_availability),
        )
        .route(
            "/availability/mentor/:id",
            get(availability::get_mentor_slots),
        )
        .route("/request", post(requests::send_request))
        .route("/request/:id/respond", patch(requests::respond_to_request))
        .route("/sessions", get(sessions::list_my_sessions));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        // Bottom layers run first.
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
