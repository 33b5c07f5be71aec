//! Request/response DTOs and JSON mapping helpers.
//!
//! Entity→response mapping is an explicit, hand-written transform; the wire
//! shape uses camelCase field names and `yyyy-mm-dd` dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use roster_core::MemberId;
use roster_members::{Member, MemberDraft, Page};

// -------------------------
// Auth DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role_name: String,
}

// -------------------------
// Member DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

impl MemberRequest {
    pub fn into_draft(self) -> MemberDraft {
        MemberDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

/// Entity→response transform, one field at a time.
pub fn member_to_response(member: Member) -> MemberResponse {
    MemberResponse {
        id: member.id,
        first_name: member.first_name,
        last_name: member.last_name,
        email: member.email,
        date_of_birth: member.date_of_birth,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersPageResponse {
    pub content: Vec<MemberResponse>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub page_number: usize,
    pub page_size: usize,
}

pub fn page_to_response(page: Page<Member>) -> MembersPageResponse {
    let total_pages = page.total_pages();
    MembersPageResponse {
        total_pages,
        total_elements: page.total_elements,
        page_number: page.page_number,
        page_size: page.page_size,
        content: page.content.into_iter().map(member_to_response).collect(),
    }
}

/// Listing query parameters (`?page=0&size=10&sort=id,asc&firstName=&lastName=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
    #[serde(default = "default_sort")]
    pub sort: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn default_page_size() -> usize {
    10
}

fn default_sort() -> String {
    "id,asc".to_string()
}
