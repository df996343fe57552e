//! Policy enforcement: collection-level role checks and object-level
//! authorship checks.

use tracing::{debug, warn};

use yamdb_core::result::AppResult;
use yamdb_entity::Authored;

use super::decision::{AccessDecision, Denial};
use super::policies::{AccessPolicies, Action, PolicyRule, ResourceKind};
use crate::caller::Caller;

/// Decides whether a caller may perform an action on a resource.
///
/// The collection-level check runs before any data is loaded. The
/// object-level check runs once the target is known and only constrains
/// [`PolicyRule::AuthorStaffOrReadOnly`] resources.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    /// The resource-to-rule mapping.
    policies: AccessPolicies,
}

impl AccessPolicy {
    /// Creates a policy with the default mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy with a custom mapping.
    pub fn with_policies(policies: AccessPolicies) -> Self {
        Self { policies }
    }

    /// Returns a reference to the underlying mapping.
    pub fn policies(&self) -> &AccessPolicies {
        &self.policies
    }

    /// Collection-level decision.
    pub fn check_collection(
        &self,
        caller: &Caller,
        action: Action,
        resource: ResourceKind,
    ) -> AccessDecision {
        let rule = self.policies.rule_for(resource);
        let allowed = match rule {
            PolicyRule::AdminOrReadOnly => action.is_read_only() || is_administrator(caller),
            PolicyRule::AuthorStaffOrReadOnly => {
                action.is_read_only() || caller.is_authenticated()
            }
            PolicyRule::AdministratorOnly => is_administrator(caller),
            PolicyRule::Authenticated => caller.is_authenticated(),
        };
        let decision = decide(caller, allowed);
        debug!(
            user = caller.username().unwrap_or("<anonymous>"),
            ?action,
            %resource,
            ?rule,
            allowed = decision.is_allowed(),
            "Collection-level access check"
        );
        decision
    }

    /// Object-level decision for an already loaded target.
    pub fn check_object(
        &self,
        caller: &Caller,
        action: Action,
        resource: ResourceKind,
        target: &dyn Authored,
    ) -> AccessDecision {
        let rule = self.policies.rule_for(resource);
        let allowed = match rule {
            PolicyRule::AuthorStaffOrReadOnly => {
                action.is_read_only()
                    || caller.id() == Some(target.author_id())
                    || caller.is_admin()
                    || caller.is_moderator()
            }
            _ => true,
        };
        let decision = decide(caller, allowed);
        debug!(
            user = caller.username().unwrap_or("<anonymous>"),
            author_id = target.author_id(),
            author = target.author(),
            ?action,
            %resource,
            allowed = decision.is_allowed(),
            "Object-level access check"
        );
        decision
    }

    /// Collection-level check as a `Result`.
    pub fn require_collection(
        &self,
        caller: &Caller,
        action: Action,
        resource: ResourceKind,
    ) -> AppResult<()> {
        let decision = self.check_collection(caller, action, resource);
        log_denial(caller, action, resource, decision);
        decision.into_result()
    }

    /// Object-level check as a `Result`.
    pub fn require_object(
        &self,
        caller: &Caller,
        action: Action,
        resource: ResourceKind,
        target: &dyn Authored,
    ) -> AppResult<()> {
        let decision = self.check_object(caller, action, resource, target);
        log_denial(caller, action, resource, decision);
        decision.into_result()
    }
}

/// Authenticated admin, or superuser.
fn is_administrator(caller: &Caller) -> bool {
    caller.is_admin() || caller.is_superuser()
}

fn log_denial(caller: &Caller, action: Action, resource: ResourceKind, decision: AccessDecision) {
    if let AccessDecision::Deny(denial) = decision {
        warn!(
            user = caller.username().unwrap_or("<anonymous>"),
            ?action,
            %resource,
            ?denial,
            "Access denied"
        );
    }
}

fn decide(caller: &Caller, allowed: bool) -> AccessDecision {
    if allowed {
        AccessDecision::Allow
    } else if caller.is_authenticated() {
        AccessDecision::Deny(Denial::Forbidden)
    } else {
        AccessDecision::Deny(Denial::NotAuthenticated)
    }
}
