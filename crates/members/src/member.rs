use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use roster_core::{DomainError, DomainResult, MemberId};

/// A registered member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

/// Field set for creating or replacing a member.
///
/// Drafts are validated and normalized before they reach a store: names are
/// trimmed, the email is trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
}

impl MemberDraft {
    pub fn validated(mut self) -> DomainResult<Self> {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();

        if self.first_name.is_empty() {
            return Err(DomainError::validation("first name is required"));
        }
        if self.last_name.is_empty() {
            return Err(DomainError::validation("last name is required"));
        }
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(self)
    }
}

impl Member {
    pub fn new(id: MemberId, draft: MemberDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            date_of_birth: draft.date_of_birth,
        }
    }

    /// Replace all mutable fields from `draft` (full update, PUT semantics).
    pub fn apply(&mut self, draft: MemberDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.date_of_birth = draft.date_of_birth;
    }
}
