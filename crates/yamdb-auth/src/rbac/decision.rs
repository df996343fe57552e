//! Outcome of a policy check.

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;

/// Reported to anonymous callers denied access.
pub const NOT_AUTHENTICATED: &str = "Учетные данные не были предоставлены.";

/// Reported to authenticated callers denied access.
pub const PERMISSION_DENIED: &str = "У вас недостаточно прав для выполнения данного действия.";

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The caller presented no credentials.
    NotAuthenticated,
    /// The caller is authenticated but lacks the permission.
    Forbidden,
}

impl Denial {
    /// Fixed human-readable reason.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => NOT_AUTHENTICATED,
            Self::Forbidden => PERMISSION_DENIED,
        }
    }
}

/// Allow, or deny with a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The operation may proceed.
    Allow,
    /// The operation is refused.
    Deny(Denial),
}

impl AccessDecision {
    /// Whether the operation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert into the error a transport would report.
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(Denial::NotAuthenticated) => {
                Err(AppError::authentication(NOT_AUTHENTICATED))
            }
            Self::Deny(Denial::Forbidden) => Err(AppError::authorization(PERMISSION_DENIED)),
        }
    }
}
