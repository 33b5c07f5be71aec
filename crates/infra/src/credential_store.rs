//! In-memory credential store: username → password hash + role.
//!
//! Passwords are bcrypt-hashed at registration and verified at login. The
//! role catalog is seeded at startup; registration against an unknown role
//! is rejected.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use tracing::debug;

use roster_auth::{ROLE_ADMIN, ROLE_USER, Role};
use roster_core::{RoleId, UserId};

/// Credential store failure kinds.
///
/// Display strings double as the user-facing response bodies, so keep them
/// aligned with the HTTP contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Role not found")]
    RoleNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// A stored login identity.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// In-memory credential store.
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, UserRecord>>,
    roles: RwLock<HashMap<String, RoleId>>,
    bcrypt_cost: u32,
}

impl InMemoryCredentialStore {
    /// Empty store with an empty role catalog.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            roles: RwLock::new(HashMap::new()),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Store seeded with the registry's role catalog (`USER`, `ADMIN`).
    pub fn with_default_roles() -> Self {
        let store = Self::new();
        store.add_role(ROLE_USER);
        store.add_role(ROLE_ADMIN);
        store
    }

    /// Lower the bcrypt cost (tests only; the default cost is slow by design).
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Add a role to the catalog. Role names are canonicalized to uppercase.
    pub fn add_role(&self, name: &str) {
        self.roles
            .write()
            .unwrap()
            .insert(canonical(name), RoleId::new());
    }

    /// Register a new user under `role_name`.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        role_name: &str,
    ) -> Result<UserId, CredentialError> {
        let role = canonical(role_name);
        if !self.roles.read().unwrap().contains_key(&role) {
            return Err(CredentialError::RoleNotFound);
        }

        let mut users = self.users.write().unwrap();
        if users.contains_key(username) {
            return Err(CredentialError::DuplicateUsername);
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;

        let id = UserId::new();
        users.insert(
            username.to_string(),
            UserRecord {
                id,
                username: username.to_string(),
                password_hash,
                role: Role::new(role),
            },
        );

        debug!(username, "registered user");
        Ok(id)
    }

    /// Verify a username/password pair and return the caller's role.
    ///
    /// The failure is uniform: callers cannot distinguish unknown usernames
    /// from wrong passwords.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Role, CredentialError> {
        let record = self
            .users
            .read()
            .unwrap()
            .get(username)
            .cloned()
            .ok_or(CredentialError::InvalidCredentials)?;

        let matches = bcrypt::verify(password, &record.password_hash)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        if !matches {
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(record.role)
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

fn canonical(role_name: &str) -> String {
    role_name.trim().to_uppercase()
}
