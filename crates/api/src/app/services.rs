//! Service wiring shared by the HTTP handlers.
//!
//! The member cache sits here so every call site of `get_or_load` and
//! `invalidate` is visible in one place: reads by id go through
//! [`AppServices::member_by_id`], and the write paths invalidate before they
//! report success.

use std::sync::Arc;

use roster_auth::{TokenConfig, TokenService};
use roster_core::MemberId;
use roster_infra::{EntityCache, InMemoryCredentialStore, InMemoryMemberStore};
use roster_members::{Member, MemberDraft, MemberStore, StoreError};

pub struct AppServices {
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub members: Arc<dyn MemberStore>,
    member_cache: EntityCache<MemberId, Member, StoreError>,
}

impl AppServices {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            tokens: Arc::new(TokenService::new(TokenConfig::new(jwt_secret.into_bytes()))),
            credentials: Arc::new(InMemoryCredentialStore::with_default_roles()),
            members: Arc::new(InMemoryMemberStore::new()),
            member_cache: EntityCache::new(),
        }
    }

    /// Read-through fetch of a member by id.
    ///
    /// A not-found result is an error, not a cached value, so a later create
    /// of the same id is visible immediately.
    pub async fn member_by_id(&self, id: MemberId) -> Result<Member, StoreError> {
        self.member_cache
            .get_or_load(&id, || async move {
                tracing::info!(member_id = %id, "fetching member from store");
                self.members.get(id)?.ok_or(StoreError::NotFound)
            })
            .await
    }

    /// Update a member, invalidating its cache entry before returning.
    pub fn update_member(&self, id: MemberId, draft: MemberDraft) -> Result<Member, StoreError> {
        let updated = self.members.update(id, draft)?;
        self.member_cache.invalidate(&id);
        Ok(updated)
    }

    /// Delete a member, invalidating its cache entry before returning.
    pub fn delete_member(&self, id: MemberId) -> Result<(), StoreError> {
        self.members.delete(id)?;
        self.member_cache.invalidate(&id);
        Ok(())
    }
}
