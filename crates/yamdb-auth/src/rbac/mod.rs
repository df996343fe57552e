//! Role-based access control with authorship checks.

pub mod decision;
pub mod enforcer;
pub mod policies;

pub use decision::{AccessDecision, Denial, NOT_AUTHENTICATED, PERMISSION_DENIED};
pub use enforcer::AccessPolicy;
pub use policies::{AccessPolicies, Action, PolicyRule, ResourceKind};
