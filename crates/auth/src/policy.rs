//! Role-based access policy for HTTP operations.
//!
//! An explicit, ordered rule table replaces annotation-driven filter chains:
//! rules are scanned top to bottom and the first rule whose method and path
//! pattern both match decides the request.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::{Principal, Role};

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// HTTP methods the policy distinguishes.
///
/// `Other` covers anything else (PATCH, HEAD, ...) and only matches
/// [`MethodMatch::Any`] rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Other,
}

impl Method {
    pub fn from_name(name: &str) -> Self {
        match name {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            _ => Method::Other,
        }
    }
}

/// Which methods a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatch {
    Any,
    OneOf(Vec<Method>),
}

impl MethodMatch {
    pub fn only(method: Method) -> Self {
        Self::OneOf(vec![method])
    }

    fn matches(&self, method: Method) -> bool {
        match self {
            MethodMatch::Any => true,
            MethodMatch::OneOf(methods) => method != Method::Other && methods.contains(&method),
        }
    }
}

/// Request path pattern.
///
/// Either an exact literal (`/auth/login`) or a prefix followed by `/**`
/// (`/api/v1/members/**`), which matches the prefix itself and any path
/// below it. A bare `/**` matches every path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern(Cow<'static, str>);

impl PathPattern {
    pub fn new(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn matches(&self, path: &str) -> bool {
        match self.0.strip_suffix("/**") {
            Some("") => true,
            Some(prefix) => {
                path == prefix
                    || (path.starts_with(prefix)
                        && path.as_bytes().get(prefix.len()) == Some(&b'/'))
            }
            None => path == self.0,
        }
    }
}

/// What a matched rule requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Allowed regardless of principal.
    Public,
    /// Any authenticated principal, roles irrelevant.
    AuthenticatedOnly,
    /// Principal must hold at least one of these roles.
    AnyOf(BTreeSet<Role>),
}

/// One entry in the ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub methods: MethodMatch,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(
        methods: MethodMatch,
        pattern: impl Into<Cow<'static, str>>,
        requirement: Requirement,
    ) -> Self {
        Self {
            methods,
            pattern: PathPattern::new(pattern),
            requirement,
        }
    }
}

/// Outcome of a policy decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No principal, and the matched rule requires one.
    Unauthenticated,
    /// Principal present but lacks every required role.
    Forbidden,
}

/// Ordered access rule table, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// The member-registry rule table:
    ///
    /// 1. `POST /auth/login`, `POST /auth/register` — public
    /// 2. `GET /api/v1/members/**` — USER or ADMIN
    /// 3. `POST|PUT|DELETE /api/v1/members/**` — ADMIN
    /// 4. `ANY /**` — any authenticated principal
    pub fn member_registry() -> Self {
        let read_roles: BTreeSet<Role> =
            [Role::new(ROLE_USER), Role::new(ROLE_ADMIN)].into_iter().collect();
        let write_roles: BTreeSet<Role> = [Role::new(ROLE_ADMIN)].into_iter().collect();

        Self::new(vec![
            AccessRule::new(
                MethodMatch::only(Method::Post),
                "/auth/login",
                Requirement::Public,
            ),
            AccessRule::new(
                MethodMatch::only(Method::Post),
                "/auth/register",
                Requirement::Public,
            ),
            AccessRule::new(
                MethodMatch::only(Method::Get),
                "/api/v1/members/**",
                Requirement::AnyOf(read_roles),
            ),
            AccessRule::new(
                MethodMatch::OneOf(vec![Method::Post, Method::Put, Method::Delete]),
                "/api/v1/members/**",
                Requirement::AnyOf(write_roles),
            ),
            AccessRule::new(MethodMatch::Any, "/**", Requirement::AuthenticatedOnly),
        ])
    }

    /// Decide whether `principal` may perform `method` on `path`.
    ///
    /// Pure function: no IO, no locking, no side effects. If no rule matches,
    /// any authenticated principal is allowed (authenticated catch-all) and
    /// anonymous callers are rejected.
    pub fn decide(&self, principal: Option<&Principal>, method: Method, path: &str) -> Decision {
        for rule in &self.rules {
            if !rule.methods.matches(method) || !rule.pattern.matches(path) {
                continue;
            }

            return match &rule.requirement {
                Requirement::Public => Decision::Allow,
                Requirement::AuthenticatedOnly => match principal {
                    Some(_) => Decision::Allow,
                    None => Decision::Deny(DenyReason::Unauthenticated),
                },
                Requirement::AnyOf(required) => match principal {
                    Some(p) if p.holds_any(required) => Decision::Allow,
                    Some(_) => Decision::Deny(DenyReason::Forbidden),
                    None => Decision::Deny(DenyReason::Unauthenticated),
                },
            };
        }

        match principal {
            Some(_) => Decision::Allow,
            None => Decision::Deny(DenyReason::Unauthenticated),
        }
    }
}
