use axum::{Router, routing::get};

pub mod auth;
pub mod members;
pub mod system;

/// Full route tree.
///
/// Access control is not encoded in the router shape: every route passes
/// through the auth gate, and the policy rule table decides which of them
/// admit anonymous callers.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/whoami", get(system::whoami))
        .nest("/auth", auth::router())
        .nest("/api/v1/members", members::router())
}
