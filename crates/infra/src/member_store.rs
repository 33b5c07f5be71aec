//! In-memory member store.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use roster_core::MemberId;
use roster_members::{
    Member, MemberDraft, MemberFilter, MemberStore, Page, PageRequest, Sort, StoreError,
};

/// In-memory member store for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    inner: RwLock<HashMap<MemberId, Member>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemberStore for InMemoryMemberStore {
    fn create(&self, draft: MemberDraft) -> Result<Member, StoreError> {
        let mut map = self.inner.write().unwrap();
        if map.values().any(|m| m.email == draft.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let member = Member::new(MemberId::new(), draft);
        debug!(member_id = %member.id, "created member");
        map.insert(member.id, member.clone());
        Ok(member)
    }

    fn get(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.inner.read().unwrap().get(&id).cloned())
    }

    fn update(&self, id: MemberId, draft: MemberDraft) -> Result<Member, StoreError> {
        let mut map = self.inner.write().unwrap();
        if map
            .values()
            .any(|m| m.id != id && m.email == draft.email)
        {
            return Err(StoreError::DuplicateEmail);
        }

        let member = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        member.apply(draft);
        Ok(member.clone())
    }

    fn delete(&self, id: MemberId) -> Result<(), StoreError> {
        self.inner
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn query(
        &self,
        filter: &MemberFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Page<Member>, StoreError> {
        let map = self.inner.read().unwrap();

        let mut matched: Vec<Member> = map.values().filter(|m| filter.matches(m)).cloned().collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        let total_elements = matched.len();
        let content = matched
            .into_iter()
            .skip(page.page * page.size)
            .take(page.size)
            .collect();

        Ok(Page {
            content,
            total_elements,
            page_number: page.page,
            page_size: page.size,
        })
    }
}
