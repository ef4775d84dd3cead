//! Token service - issues and verifies signed, time-limited bearer tokens.
//!
//! Tokens are stateless and self-describing: the expiry travels inside the
//! signed payload, nothing is persisted. Only HS256 is accepted on the
//! verification path, so a token claiming another algorithm is rejected
//! before its payload is ever trusted.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{BEARER_TOKEN_PREFIX, TOKEN_LIFETIME_SECS};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier (the user the token was issued for)
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// An issued access token: the signed string plus its lifetime, so callers
/// can report remaining validity without re-parsing the token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub lifetime: Duration,
}

/// Token service trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed token for the given subject identifier
    fn issue(&self, subject: Uuid) -> AppResult<AccessToken>;

    /// Verify a token string and extract its claims
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of TokenService backed by HS256 JWTs.
///
/// The signing secret is injected at construction (no globals), which
/// keeps tests free to use distinct secrets.
pub struct JwtTokenService {
    secret: String,
    lifetime: Duration,
}

impl JwtTokenService {
    /// Create a token service with the fixed 1-hour lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_lifetime(secret, Duration::from_secs(TOKEN_LIFETIME_SECS))
    }

    /// Create a token service with an explicit lifetime
    pub fn with_lifetime(secret: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            lifetime,
        }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: Uuid) -> AppResult<AccessToken> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.lifetime.as_secs() as i64);

        let claims = Claims {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let value = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(AccessToken {
            value,
            lifetime: self.lifetime,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        // HS256 only; expiry is validated against the embedded timestamp
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

/// Extract the token from a raw `Authorization` header value.
///
/// Expects the `"Bearer <token>"` scheme; malformed input lacking the
/// prefix fails with `InvalidToken` instead of panicking.
pub fn bearer_token(header: &str) -> AppResult<&str> {
    header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-minimum-32-chars!!";

    #[test]
    fn issue_then_verify_round_trips_subject() {
        let service = JwtTokenService::new(SECRET);
        let subject = Uuid::new_v4();

        let token = service.issue(subject).unwrap();
        assert_eq!(token.lifetime, Duration::from_secs(TOKEN_LIFETIME_SECS));

        let claims = service.verify(&token.value).unwrap();
        assert_eq!(claims.sub, subject);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_other_secret() {
        let issuer = JwtTokenService::new(SECRET);
        let verifier = JwtTokenService::new("another-secret-key-minimum-32-chars");

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            verifier.verify(&token.value),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let service = JwtTokenService::new(SECRET);
        let now = Utc::now();

        // Well past the default validation leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (now - chrono::Duration::hours(2)).timestamp(),
            iat: (now - chrono::Duration::hours(3)).timestamp(),
        };
        let stale = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&stale),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn verify_rejects_other_algorithm() {
        let service = JwtTokenService::new(SECRET);
        let now = Utc::now();

        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };
        let confused = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&confused),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn verify_rejects_garbage() {
        let service = JwtTokenService::new(SECRET);
        assert!(matches!(
            service.verify("not.a.token"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(service.verify(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn bearer_extraction_handles_malformed_headers() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(bearer_token("abc.def.ghi").is_err());
        assert!(bearer_token("Basic abc").is_err());
        assert!(bearer_token("").is_err());
        assert!(bearer_token("Bearer").is_err());
    }
}
