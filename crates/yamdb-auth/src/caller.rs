//! The identity a request is evaluated for.

use serde::{Deserialize, Serialize};

use yamdb_entity::user::{User, UserRole};

/// An authenticated identity as seen by the access policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity id.
    pub id: i64,
    /// Username; changes when the identity renames itself.
    pub username: String,
    /// Current role.
    pub role: UserRole,
    /// Superuser flag from the hosting environment.
    pub is_superuser: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }
}

/// The caller of a service operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    /// No credentials were presented.
    #[default]
    Anonymous,
    /// A verified identity.
    Authenticated(Principal),
}

impl Caller {
    /// Whether the caller presented valid credentials.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }

    /// Id of an authenticated caller.
    pub fn id(&self) -> Option<i64> {
        self.principal().map(|p| p.id)
    }

    /// Username of an authenticated caller.
    pub fn username(&self) -> Option<&str> {
        self.principal().map(|p| p.username.as_str())
    }

    /// Authenticated with the admin role.
    pub fn is_admin(&self) -> bool {
        self.principal().is_some_and(|p| p.role.is_admin())
    }

    /// Authenticated with the moderator role.
    pub fn is_moderator(&self) -> bool {
        self.principal().is_some_and(|p| p.role.is_moderator())
    }

    /// Authenticated superuser.
    pub fn is_superuser(&self) -> bool {
        self.principal().is_some_and(|p| p.is_superuser)
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self::Authenticated(Principal::from(user))
    }
}
