//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use yamdb_core::config::AuthConfig;
use yamdb_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::authentication(format!(
                "Invalid token type: expected {expected:?} token"
            )));
        }
        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use yamdb_core::error::ErrorKind;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pair_decodes_by_type() {
        let encoder = JwtEncoder::new(&config("secret"));
        let decoder = JwtDecoder::new(&config("secret"));
        let pair = encoder.generate_token_pair(4, "bob").unwrap();
        assert_ne!(pair.access, pair.refresh);

        let access = decoder.decode_access_token(&pair.access).unwrap();
        assert_eq!(access.username(), "bob");
        assert_eq!(access.user_id(), 4);
        assert!(!access.is_expired());
        let refresh = decoder.decode_refresh_token(&pair.refresh).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(refresh.expires_at() > access.expires_at());

        let err = decoder.decode_refresh_token(&pair.access).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(decoder.decode_access_token(&pair.refresh).is_err());
    }

    #[test]
    fn test_wrong_secret_and_garbage_rejected() {
        let pair = JwtEncoder::new(&config("one"))
            .generate_token_pair(4, "bob")
            .unwrap();
        let decoder = JwtDecoder::new(&config("two"));
        assert_eq!(
            decoder.decode_access_token(&pair.access).unwrap_err().kind,
            ErrorKind::Authentication
        );
        assert!(decoder.decode_access_token("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::new(
            4,
            "bob",
            TokenType::Access,
            Utc::now() - Duration::minutes(10),
        );
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        let err = JwtDecoder::new(&config("secret"))
            .decode_access_token(&token)
            .unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }
}
