//! Bearer token handling.
//!
//! Tokens are HS256 JWTs whose `userId` claim is the owner id attached to
//! every record. The server only verifies tokens; issuing them is left to
//! whoever holds the shared secret (see the admin CLI).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error as JwtError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to create a token.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The expiry does not fit a JWT `exp` claim.
    #[error("token lifetime out of range")]
    TtlOutOfRange,
    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id of the authenticated user.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// The time the token was issued.
    pub iat: usize,
    /// The expiry time of the token.
    pub exp: usize,
}

/// Signing and verification keys derived from one shared secret.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Create a token for `user_id` valid for `ttl`.
    pub fn issue(&self, user_id: &str, ttl: Duration) -> Result<String, IssueError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .and_then(|exp| usize::try_from(exp.timestamp()).ok())
            .ok_or(IssueError::TtlOutOfRange)?;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: usize::try_from(now.timestamp()).map_err(|_| IssueError::TtlOutOfRange)?,
            exp,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}
