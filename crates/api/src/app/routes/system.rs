use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the authenticated caller's identity (useful for smoke tests).
pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "username": principal.username(),
        "roles": principal
            .principal()
            .roles()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>(),
    }))
}
