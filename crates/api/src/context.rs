use roster_auth::Principal;

/// Principal context for a request (authenticated identity + roles).
///
/// Attached to request extensions by the auth gate after successful token
/// verification; absent on public routes reached anonymously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext(Principal);

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self(principal)
    }

    pub fn principal(&self) -> &Principal {
        &self.0
    }

    pub fn username(&self) -> &str {
        self.0.username()
    }
}
