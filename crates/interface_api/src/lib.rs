//! HTTP API layer
//!
//! Axum REST surface over [`domain_claims::ClaimService`]. The health
//! probes are public; everything under `/api/v1` passes through the JWT
//! auth middleware, which resolves the caller to a typed actor, and the
//! audit middleware, which logs every request.
//!
//! ```rust,ignore
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClaimService>,
    pub config: ApiConfig,
}

/// Builds the router with all routes and middleware attached
pub fn create_router(service: Arc<ClaimService>, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/validate/:stage", post(claims::validate_stage))
        .route("/:id", get(claims::get_claim))
        .route("/:id/transition", post(claims::transition))
        .route("/:id/queue", put(claims::update_queue))
        .route("/:id/checklist", put(claims::toggle_checklist_item))
        .route("/:id/verification", post(claims::submit_verification))
        .route("/:id/committee", post(claims::convene_committee))
        .route("/:id/votes", post(claims::cast_vote))
        .route("/:id/consensus", get(claims::get_consensus))
        .route("/:id/decision", post(claims::finalize_decision));

    // Layers run bottom-up: auth resolves the actor before audit logs it
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
