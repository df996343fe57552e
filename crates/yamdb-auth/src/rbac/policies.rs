//! Resource-to-rule mapping definitions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a collection.
    List,
    /// Read one object.
    Retrieve,
    /// Create an object.
    Create,
    /// Replace an object.
    Update,
    /// Patch an object.
    PartialUpdate,
    /// Delete an object.
    Destroy,
}

impl Action {
    /// Read-only actions never change state.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List | Self::Retrieve)
    }
}

/// Kinds of resource the policy governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Catalog categories.
    Category,
    /// Catalog genres.
    Genre,
    /// Catalog titles.
    Title,
    /// Reviews of titles.
    Review,
    /// Comments on reviews.
    Comment,
    /// Identity management.
    User,
    /// The caller's own profile.
    Profile,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::Genre => "genre",
            Self::Title => "title",
            Self::Review => "review",
            Self::Comment => "comment",
            Self::User => "user",
            Self::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// A permission rule applied to a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRule {
    /// Anyone reads; admins and superusers write.
    AdminOrReadOnly,
    /// Anyone reads; authenticated users create; the author or staff
    /// (admin, moderator) modify.
    AuthorStaffOrReadOnly,
    /// Admins and superusers only, for every action.
    AdministratorOnly,
    /// Any authenticated caller.
    Authenticated,
}

/// Maps each resource kind to the rule that guards it.
#[derive(Debug, Clone)]
pub struct AccessPolicies {
    /// Resource → rule.
    rules: HashMap<ResourceKind, PolicyRule>,
}

impl AccessPolicies {
    /// Creates the default mapping.
    pub fn new() -> Self {
        let rules = [
            (ResourceKind::Category, PolicyRule::AdminOrReadOnly),
            (ResourceKind::Genre, PolicyRule::AdminOrReadOnly),
            (ResourceKind::Title, PolicyRule::AdminOrReadOnly),
            (ResourceKind::Review, PolicyRule::AuthorStaffOrReadOnly),
            (ResourceKind::Comment, PolicyRule::AuthorStaffOrReadOnly),
            (ResourceKind::User, PolicyRule::AdministratorOnly),
            (ResourceKind::Profile, PolicyRule::Authenticated),
        ]
        .into_iter()
        .collect();
        Self { rules }
    }

    /// Replace the rule for one resource kind.
    pub fn with_rule(mut self, resource: ResourceKind, rule: PolicyRule) -> Self {
        self.rules.insert(resource, rule);
        self
    }

    /// The rule for a resource kind. Unmapped kinds fall back to the
    /// strictest rule.
    pub fn rule_for(&self, resource: ResourceKind) -> PolicyRule {
        self.rules
            .get(&resource)
            .copied()
            .unwrap_or(PolicyRule::AdministratorOnly)
    }
}

impl Default for AccessPolicies {
    fn default() -> Self {
        Self::new()
    }
}
