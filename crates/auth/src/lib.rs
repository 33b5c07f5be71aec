//! `roster-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the token
//! service signs and verifies claims, the policy engine decides requests, and
//! neither knows anything about axum or the stores.

pub mod policy;
pub mod principal;
pub mod roles;
pub mod token;

pub use policy::{
    AccessPolicy, AccessRule, Decision, DenyReason, Method, MethodMatch, PathPattern, Requirement,
    ROLE_ADMIN, ROLE_USER,
};
pub use principal::Principal;
pub use roles::Role;
pub use token::{TokenConfig, TokenError, TokenService};
