//! Login and registration endpoints (the public surface).

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use roster_auth::Role;
use roster_infra::CredentialError;

use crate::app::{dto, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let role = match services.credentials.authenticate(&body.username, &body.password) {
        Ok(role) => role,
        Err(e) => {
            // Uniform rejection; the cause stays in the logs.
            tracing::debug!(username = %body.username, error = %e, "login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                CredentialError::InvalidCredentials.to_string(),
            )
                .into_response();
        }
    };

    let roles: BTreeSet<Role> = [role].into_iter().collect();
    match services.tokens.issue(&body.username, &roles) {
        Ok(token) => (StatusCode::OK, Json(dto::LoginResponse { token })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    match services
        .credentials
        .register(&body.username, &body.password, &body.role_name)
    {
        Ok(user_id) => {
            tracing::info!(username = %body.username, %user_id, "user registered");
            (StatusCode::OK, "User registered successfully").into_response()
        }
        Err(e @ (CredentialError::DuplicateUsername | CredentialError::RoleNotFound)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
