//! Per-request authentication and authorization gate.
//!
//! One explicit middleware replaces a declarative security filter chain: it
//! resolves the caller's principal from the bearer token, asks the access
//! policy to decide the (method, path) pair, and either rejects the request
//! or attaches the principal to the request context.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use roster_auth::{AccessPolicy, Decision, DenyReason, Method, TokenService};

use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub policy: Arc<AccessPolicy>,
}

pub async fn auth_gate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    // No credential is fine at this point: the policy decides below whether
    // the target actually admits anonymous callers.
    let principal = match extract_bearer(req.headers()) {
        Some(token) => match state.tokens.verify(token) {
            Ok(principal) => Some(principal),
            Err(e) => {
                // Sub-reason (malformed/signature/expired) stays in the logs.
                tracing::debug!(error = %e, "rejected bearer token");
                return Err(StatusCode::UNAUTHORIZED.into_response());
            }
        },
        None => None,
    };

    let method = Method::from_name(req.method().as_str());
    let path = req.uri().path().to_string();

    match state.policy.decide(principal.as_ref(), method, &path) {
        Decision::Allow => {}
        Decision::Deny(DenyReason::Unauthenticated) => {
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }
        Decision::Deny(DenyReason::Forbidden) => {
            return Err(forbidden_response(&path));
        }
    }

    if let Some(principal) = principal {
        req.extensions_mut().insert(PrincipalContext::new(principal));
    }

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

fn forbidden_response(path: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({
            "status": 403,
            "error": "Forbidden",
            "message": "Access Denied",
            "path": path,
        })),
    )
        .into_response()
}
