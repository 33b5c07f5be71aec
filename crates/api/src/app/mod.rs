//! HTTP API application wiring (Axum router + middleware chain).
//!
//! Structure:
//! - `services.rs`: store/cache/token wiring shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use roster_auth::AccessPolicy;

use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(services::AppServices::new(jwt_secret));
    let auth_state = AuthState {
        tokens: services.tokens.clone(),
        policy: Arc::new(AccessPolicy::member_registry()),
    };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_gate,
        ))
}
