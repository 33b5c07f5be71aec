//! Signed, self-contained identity tokens (JWT, HS256).
//!
//! Tokens carry `{sub, roles, iat, exp}` and are immutable after issuance.
//! The signing key lives in [`TokenConfig`], constructed explicitly at
//! startup so tests can inject distinct keys.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{Principal, Role};

/// Token lifetime applied to every issued token.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Token service configuration.
///
/// One symmetric key for the process lifetime; no rotation. The key must be
/// loaded from the environment or a secret store — never a source literal.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    lifetime: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Override the fixed lifetime (used by tests).
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

/// Token verification failure kinds.
///
/// These are internal: the HTTP boundary collapses all of them to 401 and
/// logs the detail, so clients cannot distinguish sub-reasons.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

/// JWT claim set.
///
/// `roles` is deserialized leniently: an absent or non-list-shaped claim
/// yields an empty list rather than a parse failure, so a correctly signed
/// token without roles is authenticated-but-unprivileged, not rejected.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, deserialize_with = "roles_lenient")]
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

fn roles_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let roles = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(roles)
}

/// Issues and verifies signed identity tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            lifetime: config.lifetime,
        }
    }

    /// Issue a token for `subject` carrying `roles`.
    ///
    /// Embeds `iat = now` and `exp = now + lifetime`.
    pub fn issue(&self, subject: &str, roles: &BTreeSet<Role>) -> Result<String, TokenError> {
        self.issue_at(subject, roles, Utc::now())
    }

    fn issue_at(
        &self,
        subject: &str,
        roles: &BTreeSet<Role>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and reconstruct the caller's [`Principal`].
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    _ => TokenError::Malformed,
                }
            })?;

        let roles: BTreeSet<Role> = data.claims.roles.into_iter().map(Role::new).collect();
        Ok(Principal::new(data.claims.sub, roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(TokenConfig::new(secret.as_bytes()))
    }

    fn roles(names: &[&'static str]) -> BTreeSet<Role> {
        names.iter().map(|n| Role::new(*n)).collect()
    }

    #[test]
    fn issue_then_verify_round_trips_subject_and_roles() {
        let svc = service("test-secret-key-1234567890");
        let granted = roles(&["USER", "ADMIN"]);

        let token = svc.issue("alice", &granted).unwrap();
        let principal = svc.verify(&token).unwrap();

        assert_eq!(principal.username(), "alice");
        assert_eq!(principal.roles(), &granted);
    }

    #[test]
    fn empty_role_set_verifies_as_unprivileged() {
        let svc = service("test-secret-key-1234567890");

        let token = svc.issue("nobody", &BTreeSet::new()).unwrap();
        let principal = svc.verify(&token).unwrap();

        assert_eq!(principal.username(), "nobody");
        assert!(principal.roles().is_empty());
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service("test-secret-key-1234567890");
        let two_days_ago = Utc::now() - Duration::hours(48);

        let token = svc
            .issue_at("alice", &roles(&["USER"]), two_days_ago)
            .unwrap();

        assert_eq!(svc.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let issuer = service("secret-one");
        let verifier = service("secret-two");

        let token = issuer.issue("alice", &roles(&["USER"])).unwrap();

        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            TokenError::SignatureInvalid
        );
    }

    #[test]
    fn spliced_payload_fails_signature_check() {
        let svc = service("test-secret-key-1234567890");

        let token_a = svc.issue("alice", &roles(&["USER"])).unwrap();
        let token_b = svc.issue("mallory", &roles(&["ADMIN"])).unwrap();

        // Keep a's header+signature, swap in b's claims.
        let a: Vec<&str> = token_a.split('.').collect();
        let b: Vec<&str> = token_b.split('.').collect();
        let forged = format!("{}.{}.{}", a[0], b[1], a[2]);

        assert_eq!(
            svc.verify(&forged).unwrap_err(),
            TokenError::SignatureInvalid
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        let svc = service("test-secret-key-1234567890");
        assert_eq!(
            svc.verify("not.a.token").unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn missing_roles_claim_yields_empty_role_set() {
        #[derive(Serialize)]
        struct BareClaims {
            sub: String,
            iat: i64,
            exp: i64,
        }

        let secret = "test-secret-key-1234567890";
        let now = Utc::now();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &BareClaims {
                sub: "alice".to_string(),
                iat: now.timestamp(),
                exp: (now + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let principal = service(secret).verify(&token).unwrap();
        assert_eq!(principal.username(), "alice");
        assert!(principal.roles().is_empty());
    }

    #[test]
    fn non_list_roles_claim_yields_empty_role_set() {
        #[derive(Serialize)]
        struct OddClaims {
            sub: String,
            roles: String,
            iat: i64,
            exp: i64,
        }

        let secret = "test-secret-key-1234567890";
        let now = Utc::now();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &OddClaims {
                sub: "alice".to_string(),
                roles: "ADMIN".to_string(),
                iat: now.timestamp(),
                exp: (now + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let principal = service(secret).verify(&token).unwrap();
        assert!(principal.roles().is_empty());
    }
}
