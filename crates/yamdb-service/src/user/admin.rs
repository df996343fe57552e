//! User administration: listing, creating, editing, and deleting any
//! identity, plus provisioning superusers at startup.

use std::sync::Arc;

use tracing::{info, warn};

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::config::SuperuserSeed;
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{CommentStore, ReviewStore, UserStore};
use yamdb_entity::user::{NewUser, User, UserPatch, UserRole};

use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// Identity store.
    users: Arc<dyn UserStore>,
    /// Review store, for cascading deletes.
    reviews: Arc<dyn ReviewStore>,
    /// Comment store, for cascading deletes.
    comments: Arc<dyn CommentStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        reviews: Arc<dyn ReviewStore>,
        comments: Arc<dyn CommentStore>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            users,
            reviews,
            comments,
            policy,
        }
    }

    /// Lists users, optionally narrowed to an exact username.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::User)?;
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(username) => {
                let found = self.users.find_by_username(username).await?;
                Ok(PageResponse::paginate(found.into_iter().collect(), page))
            }
            None => self.users.find_all(page).await,
        }
    }

    /// Creates a user directly. No confirmation mail is sent.
    pub async fn create(&self, ctx: &RequestContext, input: NewUser) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::User)?;
        input.check()?;
        let user = self
            .users
            .create(input.into_user())
            .await
            .map_err(AppError::into_validation)?;
        info!(user_id = user.id, username = %user.username, role = %user.role, "User created by admin");
        Ok(user)
    }

    /// Gets a user by username.
    pub async fn retrieve(&self, ctx: &RequestContext, username: &str) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::Retrieve, ResourceKind::User)?;
        self.load(username).await
    }

    /// Replaces every editable field of a user.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        username: &str,
        input: NewUser,
    ) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::Update, ResourceKind::User)?;
        let user = self.load(username).await?;
        input.check()?;
        self.save(user, UserPatch::from(input)).await
    }

    /// Changes the fields present in the patch, role included.
    pub async fn partial_update(
        &self,
        ctx: &RequestContext,
        username: &str,
        patch: UserPatch,
    ) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::PartialUpdate, ResourceKind::User)?;
        let user = self.load(username).await?;
        patch.check()?;
        self.save(user, patch).await
    }

    /// Deletes a user together with everything they authored.
    pub async fn destroy(&self, ctx: &RequestContext, username: &str) -> AppResult<()> {
        self.policy
            .require_collection(&ctx.caller, Action::Destroy, ResourceKind::User)?;
        let user = self.load(username).await?;

        let review_ids = self.reviews.delete_by_author(user.id).await?;
        let orphaned = self.comments.delete_by_reviews(&review_ids).await?;
        let own = self.comments.delete_by_author(user.id).await?;
        self.users.delete(&user.id).await?;

        info!(
            user_id = user.id,
            username = %user.username,
            reviews = review_ids.len(),
            comments = orphaned + own,
            "User deleted"
        );
        Ok(())
    }

    /// Creates the account as an admin superuser, or promotes an existing
    /// account with that username.
    pub async fn bootstrap_superuser(&self, seed: &SuperuserSeed) -> AppResult<User> {
        match self.users.find_by_username(&seed.username).await? {
            Some(mut user) => {
                if user.is_superuser && user.role.is_admin() {
                    return Ok(user);
                }
                user.role = UserRole::Admin;
                user.is_superuser = true;
                let user = self.users.update(user).await?;
                warn!(username = %user.username, "Existing account promoted to superuser");
                Ok(user)
            }
            None => {
                let mut user = User::new(&seed.username, &seed.email);
                user.role = UserRole::Admin;
                user.is_superuser = true;
                let user = self.users.create(user).await?;
                info!(user_id = user.id, username = %user.username, "Superuser provisioned");
                Ok(user)
            }
        }
    }

    async fn load(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    async fn save(&self, mut user: User, patch: UserPatch) -> AppResult<User> {
        let previous = user.username.clone();
        user.apply_admin(patch);
        let user = self
            .users
            .update(user)
            .await
            .map_err(AppError::into_validation)?;
        if user.username != previous {
            let reviews = self.reviews.rename_author(user.id, &user.username).await?;
            let comments = self.comments.rename_author(user.id, &user.username).await?;
            info!(user_id = user.id, %previous, username = %user.username, reviews, comments, "Username changed");
        }
        info!(user_id = user.id, username = %user.username, role = %user.role, "User updated by admin");
        Ok(user)
    }
}
