//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use yamdb_core::config::AuthConfig;
use yamdb_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// Credential pair returned by a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Long-lived refresh token.
    pub refresh: String,
}

/// A freshly issued access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token.
    pub access: String,
    /// When it expires.
    #[serde(skip)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
            refresh_ttl_hours: config.jwt_refresh_ttl_hours as i64,
        }
    }

    /// Generates a new access + refresh token pair for an identity.
    pub fn generate_token_pair(&self, user_id: i64, username: &str) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let refresh_claims = Claims::new(
            user_id,
            username,
            TokenType::Refresh,
            now + Duration::hours(self.refresh_ttl_hours),
        );
        let refresh = self.sign(&refresh_claims)?;
        let access = self.generate_access_token(user_id, username)?.access;
        Ok(TokenPair { access, refresh })
    }

    /// Generates a standalone access token (e.g., after refresh).
    pub fn generate_access_token(
        &self,
        user_id: i64,
        username: &str,
    ) -> Result<AccessToken, AppError> {
        let exp = Utc::now() + Duration::minutes(self.access_ttl_minutes);
        let claims = Claims::new(user_id, username, TokenType::Access, exp);
        Ok(AccessToken {
            access: self.sign(&claims)?,
            expires_at: Some(exp),
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::internal(format!(
                "Failed to encode {:?} token: {e}",
                claims.token_type
            ))
        })
    }
}
