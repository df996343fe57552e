//! Signup, code-for-token exchange, token refresh, and bearer authentication.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use yamdb_core::error::{AppError, FieldErrors};
use yamdb_core::result::AppResult;
use yamdb_core::traits::{MailMessage, Mailer};
use yamdb_database::UserStore;
use yamdb_entity::user::{SignupRequest, User};
use yamdb_entity::validation::{self, EMAIL_TAKEN, REQUIRED, USERNAME_TAKEN};

use crate::caller::Caller;
use crate::code;
use crate::jwt::{AccessToken, JwtDecoder, JwtEncoder, TokenPair};

/// Subject of the confirmation mail; also prefixes its body.
pub const CODE_MAIL_SUBJECT: &str = "Код подтверждения";

/// Reported when the supplied confirmation code does not match.
pub const INVALID_CODE: &str = "Код валидации не корректен";

/// Echo of a successful signup. No token is issued at this step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupReceipt {
    /// Registered username.
    pub username: String,
    /// Registered email, lowercased.
    pub email: String,
}

/// Code-for-token exchange input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Username the code was issued to.
    #[serde(default)]
    pub username: String,
    /// Code from the confirmation mail.
    #[serde(default)]
    pub confirmation_code: String,
}

impl TokenRequest {
    /// Create a token request.
    pub fn new(username: impl Into<String>, confirmation_code: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            confirmation_code: confirmation_code.into(),
        }
    }

    /// Both fields are required.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if self.username.trim().is_empty() {
            validation::push(&mut fields, "username", REQUIRED);
        }
        if self.confirmation_code.trim().is_empty() {
            validation::push(&mut fields, "confirmation_code", REQUIRED);
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::from_fields(fields))
        }
    }
}

/// Token refresh input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// A refresh token from a previous exchange.
    #[serde(default)]
    pub refresh: String,
}

/// Converts signups into confirmation codes and codes into credentials.
#[derive(Debug, Clone)]
pub struct AuthExchange {
    /// Identity store.
    users: Arc<dyn UserStore>,
    /// Mail collaborator for confirmation codes.
    mailer: Arc<dyn Mailer>,
    /// Token signing.
    encoder: Arc<JwtEncoder>,
    /// Token validation.
    decoder: Arc<JwtDecoder>,
    /// Sender address of confirmation mails.
    from_address: String,
}

impl AuthExchange {
    /// Creates a new exchange.
    pub fn new(
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            users,
            mailer,
            encoder,
            decoder,
            from_address: from_address.into(),
        }
    }

    /// Register (or re-register) an identity and mail it a fresh code.
    ///
    /// The identity is persisted before the mail is sent, so a delivery
    /// failure leaves the new code stored but undelivered.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<SignupReceipt> {
        request.check()?;
        let email = validation::normalize_email(&request.email);

        if let Some(owner) = self.users.find_by_email(&email).await? {
            if owner.username != request.username {
                return Err(AppError::invalid_field("email", EMAIL_TAKEN));
            }
        }

        let confirmation_code = code::generate_confirmation_code();
        let user = match self.users.find_by_username(&request.username).await? {
            Some(existing) if existing.email != email => {
                return Err(AppError::invalid_field("username", USERNAME_TAKEN));
            }
            Some(mut existing) => {
                existing.confirmation_code = confirmation_code.clone();
                self.users
                    .update(existing)
                    .await
                    .map_err(AppError::into_validation)?
            }
            None => {
                let mut user = User::new(&request.username, &email);
                user.confirmation_code = confirmation_code.clone();
                let user = self
                    .users
                    .create(user)
                    .await
                    .map_err(AppError::into_validation)?;
                info!(user_id = user.id, username = %user.username, "User signed up");
                user
            }
        };

        let message = MailMessage::new(
            CODE_MAIL_SUBJECT,
            format!("{CODE_MAIL_SUBJECT} {confirmation_code}"),
            &self.from_address,
            &user.email,
        );
        self.mailer.send(&message).await.map_err(|e| {
            warn!(
                username = %user.username,
                backend = self.mailer.backend_name(),
                error = %e,
                "Confirmation mail not delivered"
            );
            e
        })?;
        info!(username = %user.username, "Confirmation code issued");

        Ok(SignupReceipt {
            username: user.username,
            email: user.email,
        })
    }

    /// Exchange a confirmation code for a credential pair.
    ///
    /// The code stays valid after a successful exchange.
    pub async fn obtain_token(&self, request: TokenRequest) -> AppResult<TokenPair> {
        request.check()?;
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("User '{}' not found", request.username))
            })?;

        if !code::code_matches(&user.confirmation_code, &request.confirmation_code) {
            warn!(username = %user.username, "Confirmation code mismatch");
            return Err(AppError::invalid_field("non_field_errors", INVALID_CODE));
        }

        let pair = self.encoder.generate_token_pair(user.id, &user.username)?;
        info!(username = %user.username, "Issued token pair");
        Ok(pair)
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh_token(&self, request: RefreshRequest) -> AppResult<AccessToken> {
        if request.refresh.trim().is_empty() {
            return Err(AppError::invalid_field("refresh", REQUIRED));
        }
        let claims = self.decoder.decode_refresh_token(&request.refresh)?;
        self.encoder
            .generate_access_token(claims.user_id(), claims.username())
    }

    /// Resolve an `Authorization` header value into a caller.
    ///
    /// No header yields [`Caller::Anonymous`]. Otherwise the header must
    /// carry a valid `Bearer` access token whose subject still exists under
    /// the id the token was issued for; the caller reflects that identity's
    /// current role and superuser flag.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<Caller> {
        let Some(header) = authorization else {
            return Ok(Caller::Anonymous);
        };
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;
        let claims = self.decoder.decode_access_token(token.trim())?;
        let user = self
            .users
            .find_by_username(claims.username())
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;
        if user.id != claims.user_id() {
            warn!(
                username = %user.username,
                token_user_id = claims.user_id(),
                user_id = user.id,
                "Token subject now belongs to another identity"
            );
            return Err(AppError::authentication("User not found"));
        }
        Ok(Caller::from(&user))
    }
}
