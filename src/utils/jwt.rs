use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims carried by every bearer token.
///
/// Email and name are snapshots from issue time. The subject is the
/// user id; the auth middleware resolves it against the database per
/// request, so tokens stop working the moment an account is deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per the JWT convention.
    pub sub: String,
    /// Email snapshot.
    pub email: String,
    /// Display name snapshot.
    pub name: String,
    /// Issue time, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Claims valid for `ttl_hours` from now.
    pub fn new(user_id: i64, email: String, name: String, ttl_hours: i64) -> Self {
        let issued_at = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email,
            name,
            iat: issued_at,
            exp: issued_at + ttl_hours * 3600,
        }
    }

    /// The subject parsed back into a user id.
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub.parse().map_err(|_| unauthorized("Invalid token"))
    }
}

/// Signs a bearer token for a user.
pub fn sign_token(
    user_id: i64,
    email: String,
    name: String,
    secret: &str,
    ttl_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, name, ttl_hours);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &key).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to sign JWT: {}", e),
    })
}

/// Decodes and verifies a bearer token.
///
/// Every failure mode maps to `Unauthorized`, so the API answers 401
/// without revealing more than a broad reason.
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let data = decode::<Claims>(token, &key, &Validation::default()).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => unauthorized("Token has expired"),
            ErrorKind::InvalidToken => unauthorized("Invalid token"),
            ErrorKind::InvalidSignature => unauthorized("Invalid token signature"),
            _ => unauthorized(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(data.claims)
}

fn unauthorized(message: impl Into<String>) -> AppError {
    AppError::Unauthorized {
        message: message.into(),
    }
}
