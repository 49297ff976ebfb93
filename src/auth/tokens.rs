/**
 * Token Management
 *
 * JWT issuing and verification for stateless authentication. A single
 * `TokenManager` is constructed from configuration at startup and carried in
 * the application state, so a broken verifier configuration fails at boot
 * rather than per-request.
 *
 * # Token Shape
 *
 * Tokens are HS256-signed and embed `{sub: user id, email, iat, exp}` with a
 * fixed one-hour lifetime. There is no revocation list: a token is valid
 * exactly when its signature verifies and it has not expired.
 *
 * # Failure Classes
 *
 * Verification failures (malformed, bad signature, expired) are the expected,
 * caller-facing class and map to an authentication rejection. Issuance
 * failures are infrastructure faults and map to a server error.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed token lifetime: one hour.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The user id carried in `sub`, if it parses.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Token failure classes.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The presented token is malformed, expired, or carries a bad
    /// signature. Expected; surfaces as an authentication rejection.
    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
    /// Issuing a token failed. Infrastructure fault; surfaces as a server
    /// error.
    #[error("token issuance failed: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies identity tokens.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for a user. Pure computation, no I/O.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        let key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &key).map_err(TokenError::Issue)
    }

    /// Verify a raw token and return its claims. Pure computation, no I/O.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Rejected)
    }
}
