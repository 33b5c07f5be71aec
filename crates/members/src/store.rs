use std::sync::Arc;

use thiserror::Error;

use roster_core::MemberId;

use crate::{Member, MemberDraft, MemberFilter, Page, PageRequest, Sort};

/// Member store failure kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("member not found")]
    NotFound,

    #[error("email already exists")]
    DuplicateEmail,
}

/// Contract the registry expects from the member persistence layer.
///
/// Implementations must be safe to share across request tasks. Drafts passed
/// in are assumed to be validated (see [`MemberDraft::validated`]).
pub trait MemberStore: Send + Sync {
    /// Persist a new member, allocating its id. Rejects duplicate emails.
    fn create(&self, draft: MemberDraft) -> Result<Member, StoreError>;

    fn get(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// Full replace of a member's fields. Rejects an email already used by a
    /// different record.
    fn update(&self, id: MemberId, draft: MemberDraft) -> Result<Member, StoreError>;

    fn delete(&self, id: MemberId) -> Result<(), StoreError>;

    /// Filtered, sorted, paginated listing.
    fn query(
        &self,
        filter: &MemberFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Page<Member>, StoreError>;
}

impl<S> MemberStore for Arc<S>
where
    S: MemberStore + ?Sized,
{
    fn create(&self, draft: MemberDraft) -> Result<Member, StoreError> {
        (**self).create(draft)
    }

    fn get(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, id: MemberId, draft: MemberDraft) -> Result<Member, StoreError> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: MemberId) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn query(
        &self,
        filter: &MemberFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Page<Member>, StoreError> {
        (**self).query(filter, sort, page)
    }
}
