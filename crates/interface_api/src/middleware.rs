//! API middleware
//!
//! Authentication happens once here: the JWT is validated and its role
//! claim resolved to a typed [`Actor`], which handlers pull from the
//! request extensions. A token without a recognized role is rejected at
//! the boundary rather than deep inside a handler.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use domain_claims::Actor;

use crate::auth::{actor_from_claims, validate_token};
use crate::AppState;

/// Validates the bearer token and attaches the resolved [`Actor`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = bearer.ok_or_else(|| {
        tracing::warn!("missing bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        tracing::warn!(error = %e, "token rejected");
        StatusCode::UNAUTHORIZED
    })?;

    let actor = actor_from_claims(&claims).map_err(|e| {
        tracing::warn!(subject = %claims.sub, error = %e, "no usable role in token");
        StatusCode::FORBIDDEN
    })?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

/// Logs every request with the acting identity, for the audit trail
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let (actor_id, role) = match request.extensions().get::<Actor>() {
        Some(actor) => (actor.id.clone(), actor.role.as_str()),
        None => ("anonymous".to_string(), "none"),
    };

    let started = Instant::now();
    let response = next.run(request).await;

    tracing::info!(
        %method,
        %uri,
        actor = %actor_id,
        role,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );

    response
}
