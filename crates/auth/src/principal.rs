use std::collections::BTreeSet;

use crate::Role;

/// The resolved identity of an authenticated caller.
///
/// Constructed once per request from verified token claims, attached to the
/// request context, and discarded at request end. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: BTreeSet<Role>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Whether this principal holds at least one of `required`.
    pub fn holds_any(&self, required: &BTreeSet<Role>) -> bool {
        self.roles.iter().any(|r| required.contains(r))
    }
}
