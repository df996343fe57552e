//! Request context carrying the resolved caller.

use yamdb_auth::rbac::NOT_AUTHENTICATED;
use yamdb_auth::{Caller, Principal};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;

/// Context for the current request.
///
/// Built by whatever transport hosts the services and passed into every
/// service method so that each operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller, anonymous or authenticated.
    pub caller: Caller,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(caller: Caller) -> Self {
        Self { caller }
    }

    /// Context for a caller without credentials.
    pub fn anonymous() -> Self {
        Self::new(Caller::Anonymous)
    }

    /// The authenticated caller.
    ///
    /// Services call this after the collection-level check, which already
    /// rejects anonymous callers for every operation that needs an identity.
    pub fn principal(&self) -> AppResult<&Principal> {
        self.caller
            .principal()
            .ok_or_else(|| AppError::authentication(NOT_AUTHENTICATED))
    }
}
