//! `roster-infra` — infrastructure collaborators behind the domain contracts:
//! the entity cache, the credential store, and the member store.

pub mod cache;
pub mod credential_store;
pub mod member_store;

pub use cache::EntityCache;
pub use credential_store::{CredentialError, InMemoryCredentialStore, UserRecord};
pub use member_store::InMemoryMemberStore;
