//! HS256 bearer tokens
//!
//! Tokens are issued on sign-in/sign-up and validated by `JwtAuthMiddleware`.
//! The keys are built once at startup and shared through `web::Data<TokenKeys>`.

use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issue(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)?)
    }

    /// Signature and expiry check
    pub fn validate(&self, token: &str) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(JWT_ALGORITHM);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let keys = TokenKeys::new("test-secret", 3600);
        let token = keys.issue("5f8d0d55b54764421b7156c9", "ada@example.com").unwrap();

        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "5f8d0d55b54764421b7156c9");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_rejected() {
        let keys = TokenKeys::new("test-secret", -3600);
        let token = keys.issue("u1", "u1@example.com").unwrap();
        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn foreign_secret_rejected() {
        let token = TokenKeys::new("secret-a", 3600).issue("u1", "e").unwrap();
        assert!(TokenKeys::new("secret-b", 3600).validate(&token).is_err());
    }
}
