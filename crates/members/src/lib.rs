//! `roster-members` — member domain: entity, validation, listing model, and
//! the store contract the HTTP layer programs against.

pub mod member;
pub mod query;
pub mod store;

pub use member::{Member, MemberDraft};
pub use query::{MemberFilter, Page, PageRequest, Sort, SortDir, SortField};
pub use store::{MemberStore, StoreError};
