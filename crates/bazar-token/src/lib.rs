//! # bazar-token — Token Service Boundary
//!
//! Issues and validates the signed bearer tokens that flow between the
//! member service (issuance at login) and the gateway auth gate
//! (validation + claim lookup). Tokens are HS256 JWTs carrying the
//! registered claims `sub`/`iat`/`exp` plus arbitrary custom claims.
//!
//! The gate consumes tokens only through the [`TokenVerifier`] trait,
//! a pure `validate` predicate plus a `claims` decoder, so it can be
//! exercised in tests with counting fakes.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from token issuance or decoding.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature verification failed or the token is structurally invalid.
    #[error("invalid token")]
    Invalid,

    /// The token's `exp` claim is in the past.
    #[error("token expired")]
    Expired,

    /// Token could not be produced (key or serialization failure).
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Claim set carried by a validated token.
///
/// Registered claims are typed fields; everything else lands in the
/// flattened `custom` map and is looked up by key via [`Claims::get`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued for.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Custom claims (e.g. `userId`, `email`).
    #[serde(flatten)]
    pub custom: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Look up a custom claim by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom.get(key)
    }
}

/// Validation side of the token boundary, as consumed by the gateway.
pub trait TokenVerifier: Send + Sync {
    /// Pure predicate: does this token carry a valid signature and
    /// an unexpired `exp` claim? No side effects.
    fn validate(&self, token: &str) -> bool;

    /// Decode the full claim set of a token.
    fn claims(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 token service: shared-secret issuance and validation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Build a service from a shared secret and a token lifetime.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs,
        }
    }

    /// Issue a token for `subject` carrying the given custom claims.
    pub fn issue(
        &self,
        subject: &str,
        custom: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
            custom,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issuance(e.to_string()))
    }
}

impl TokenVerifier for TokenService {
    fn validate(&self, token: &str) -> bool {
        decode::<Claims>(token, &self.decoding_key, &self.validation).is_ok()
    }

    fn claims(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new("test-secret", 3600)
    }

    fn custom_claims(user_id: i64, email: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("userId".to_string(), json!(user_id));
        map.insert("email".to_string(), json!(email));
        map
    }

    #[test]
    fn issued_token_validates() {
        let svc = service();
        let token = svc.issue("alice@example.com", custom_claims(1, "alice@example.com")).unwrap();
        assert!(svc.validate(&token));
    }

    #[test]
    fn claims_round_trip() {
        let svc = service();
        let token = svc.issue("alice@example.com", custom_claims(42, "alice@example.com")).unwrap();
        let claims = svc.claims(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.get("userId"), Some(&json!(42)));
        assert_eq!(claims.get("email"), Some(&json!("alice@example.com")));
        assert!(claims.get("missing").is_none());
    }

    #[test]
    fn garbage_token_rejected() {
        let svc = service();
        assert!(!svc.validate("not.a.token"));
        assert!(matches!(svc.claims("not.a.token"), Err(TokenError::Invalid)));
    }

    #[test]
    fn wrong_secret_rejected() {
        let svc = service();
        let other = TokenService::new("different-secret", 3600);
        let token = svc.issue("bob@example.com", custom_claims(2, "bob@example.com")).unwrap();
        assert!(!other.validate(&token));
    }

    #[test]
    fn expired_token_rejected() {
        // Negative TTL puts exp well before now, beyond the default leeway.
        let svc = TokenService::new("test-secret", -3600);
        let token = svc.issue("old@example.com", custom_claims(3, "old@example.com")).unwrap();
        assert!(!svc.validate(&token));
        assert!(matches!(svc.claims(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn validate_has_no_claim_requirements_beyond_exp() {
        // Tokens without custom claims are still valid; claim presence is
        // a gateway policy decision, not a token-level one.
        let svc = service();
        let token = svc.issue("no-claims@example.com", serde_json::Map::new()).unwrap();
        assert!(svc.validate(&token));
        assert!(svc.claims(&token).unwrap().get("userId").is_none());
    }
}
