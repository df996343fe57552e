//! User entity model and its input shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail};

use yamdb_core::error::FieldErrors;
use yamdb_core::result::AppResult;

use super::role::UserRole;
use crate::validation::{self, REQUIRED};

/// A registered identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique login name, case-sensitive as stored.
    pub username: String,
    /// Unique email address, stored in lowercase.
    pub email: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Free-form biography.
    #[serde(default)]
    pub bio: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Current confirmation code; blank until the first signup.
    #[serde(skip_serializing, default)]
    pub confirmation_code: String,
    /// Granted by the hosting environment, never through the API.
    #[serde(default)]
    pub is_superuser: bool,
    /// When the identity was first registered.
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Build a fresh identity with the default role and empty profile.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            email: validation::normalize_email(&email.into()),
            role: UserRole::default(),
            bio: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            confirmation_code: String::new(),
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }

    /// Check if this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user holds the moderator role.
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }

    /// Apply a self-service profile patch. The role is never touched.
    pub fn apply_profile(&mut self, patch: ProfilePatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = validation::normalize_email(&email);
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
    }

    /// Apply an administrative patch, which may change the role.
    pub fn apply_admin(&mut self, patch: UserPatch) {
        if let Some(role) = patch.role {
            self.role = role;
        }
        self.apply_profile(ProfilePatch {
            username: patch.username,
            email: patch.email,
            bio: patch.bio,
            first_name: patch.first_name,
            last_name: patch.last_name,
        });
    }
}

/// Signup input: the only two fields a visitor provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[serde(default)]
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub username: String,
    /// Email address the confirmation code is sent to.
    #[serde(default)]
    #[validate(length(max = 254, message = "Убедитесь, что это значение содержит не более 254 символов."))]
    pub email: String,
}

impl SignupRequest {
    /// Create a signup request.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Validate all fields, collecting every failure.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_username(&self.username, &mut fields);
        check_email(&self.email, &mut fields);
        validation::finish(self.validate(), fields)
    }
}

/// Administrative creation input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewUser {
    /// Username.
    #[serde(default)]
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub username: String,
    /// Email.
    #[serde(default)]
    #[validate(length(max = 254, message = "Убедитесь, что это значение содержит не более 254 символов."))]
    pub email: String,
    /// Role; defaults to `user`.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Given name.
    #[serde(default)]
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub last_name: Option<String>,
}

impl NewUser {
    /// Validate all fields, collecting every failure.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_username(&self.username, &mut fields);
        check_email(&self.email, &mut fields);
        validation::finish(self.validate(), fields)
    }

    /// Materialize the identity described by this input.
    pub fn into_user(self) -> User {
        let mut user = User::new(self.username, self.email);
        user.role = self.role.unwrap_or_default();
        user.bio = self.bio.unwrap_or_default();
        user.first_name = self.first_name.unwrap_or_default();
        user.last_name = self.last_name.unwrap_or_default();
        user
    }
}

/// Administrative partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserPatch {
    /// New username.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub username: Option<String>,
    /// New email.
    #[validate(length(max = 254, message = "Убедитесь, что это значение содержит не более 254 символов."))]
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New biography.
    pub bio: Option<String>,
    /// New given name.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub last_name: Option<String>,
}

impl UserPatch {
    /// Validate the fields that are present.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(username) = &self.username {
            validation::check_username(username, &mut fields);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut fields);
        }
        validation::finish(self.validate(), fields)
    }
}

impl From<NewUser> for UserPatch {
    fn from(input: NewUser) -> Self {
        Self {
            username: Some(input.username),
            email: Some(input.email),
            role: Some(input.role.unwrap_or_default()),
            bio: Some(input.bio.unwrap_or_default()),
            first_name: Some(input.first_name.unwrap_or_default()),
            last_name: Some(input.last_name.unwrap_or_default()),
        }
    }
}

/// Self-service partial update. There is deliberately no `role` field, so a
/// submitted role is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfilePatch {
    /// New username.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub username: Option<String>,
    /// New email.
    #[validate(length(max = 254, message = "Убедитесь, что это значение содержит не более 254 символов."))]
    pub email: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New given name.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(length(max = 150, message = "Убедитесь, что это значение содержит не более 150 символов."))]
    pub last_name: Option<String>,
}

impl ProfilePatch {
    /// Validate the fields that are present.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(username) = &self.username {
            validation::check_username(username, &mut fields);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut fields);
        }
        validation::finish(self.validate(), fields)
    }
}

fn check_email(email: &str, fields: &mut FieldErrors) {
    if email.trim().is_empty() {
        validation::push(fields, "email", REQUIRED);
    } else if !email.trim().validate_email() {
        validation::push(fields, "email", "Введите правильный адрес электронной почты.");
    }
}
