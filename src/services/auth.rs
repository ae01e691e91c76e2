use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Hashes a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored PHC string; malformed hashes never match
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Signs and validates HS256 access and refresh tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::seconds(config.access_token_ttl_secs),
            Duration::seconds(config.refresh_token_ttl_secs),
        )
    }

    fn issue(&self, user_id: i64, token_type: TokenType) -> AppResult<String> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn issue_access(&self, user_id: i64) -> AppResult<String> {
        self.issue(user_id, TokenType::Access)
    }

    pub fn issue_pair(&self, user_id: i64) -> AppResult<TokenPair> {
        Ok(TokenPair {
            refresh: self.issue(user_id, TokenType::Refresh)?,
            access: self.issue(user_id, TokenType::Access)?,
        })
    }

    /// Decodes `token`, rejecting bad signatures, expiry and the wrong token type
    pub fn validate(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::Unauthorized("Wrong token type".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::minutes(5), Duration::days(1))
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_access_token_validates() {
        let issuer = issuer();
        let token = issuer.issue_access(42).unwrap();
        let claims = issuer.validate(&token, TokenType::Access).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let issuer = issuer();
        let pair = issuer.issue_pair(7).unwrap();
        assert!(issuer.validate(&pair.refresh, TokenType::Access).is_err());
        assert!(issuer.validate(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new("test-secret", Duration::minutes(-10), Duration::days(1));
        let token = issuer.issue_access(1).unwrap();
        assert!(matches!(
            issuer.validate(&token, TokenType::Access),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = TokenIssuer::new("other-secret", Duration::minutes(5), Duration::days(1));
        let token = other.issue_access(1).unwrap();
        assert!(issuer().validate(&token, TokenType::Access).is_err());
    }
}
