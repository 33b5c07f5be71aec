//! Member CRUD endpoints.
//!
//! Role gating happens in the auth gate middleware; by the time a handler
//! runs, the access policy has already admitted the caller. Reads by id go
//! through the entity cache; updates and deletes invalidate it.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use roster_core::MemberId;
use roster_members::{MemberFilter, PageRequest, Sort};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_member).get(list_members))
        .route(
            "/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}

pub async fn create_member(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::MemberRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft().validated() {
        Ok(draft) => draft,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.members.create(draft) {
        Ok(member) => {
            tracing::info!(member_id = %member.id, "member created");
            (StatusCode::CREATED, Json(dto::member_to_response(member))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListMembersQuery>,
) -> axum::response::Response {
    let sort = match Sort::parse(&query.sort) {
        Ok(sort) => sort,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let page = match PageRequest::new(query.page, query.size) {
        Ok(page) => page,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let filter = MemberFilter::new(query.first_name, query.last_name);

    // An empty result set is a normal outcome, not an error.
    match services.members.query(&filter, sort, page) {
        Ok(result) => (StatusCode::OK, Json(dto::page_to_response(result))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.member_by_id(id).await {
        Ok(member) => (StatusCode::OK, Json(dto::member_to_response(member))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::MemberRequest>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let draft = match body.into_draft().validated() {
        Ok(draft) => draft,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.update_member(id, draft) {
        Ok(member) => (StatusCode::OK, Json(dto::member_to_response(member))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.delete_member(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Member deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
