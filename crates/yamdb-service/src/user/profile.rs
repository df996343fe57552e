//! Self-service profile: any authenticated identity reads and patches its
//! own record. The role is not part of the patch shape.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_database::{CommentStore, ReviewStore, UserStore};
use yamdb_entity::user::{ProfilePatch, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct ProfileService {
    /// Identity store.
    users: Arc<dyn UserStore>,
    /// Review store, for keeping author names current.
    reviews: Arc<dyn ReviewStore>,
    /// Comment store, for keeping author names current.
    comments: Arc<dyn CommentStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl ProfileService {
    /// Creates a new profile service.
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

    /// Gets the caller's own profile.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::Retrieve, ResourceKind::Profile)?;
        self.current(ctx).await
    }

    /// Updates the caller's own profile fields.
    pub async fn update_me(&self, ctx: &RequestContext, patch: ProfilePatch) -> AppResult<User> {
        self.policy
            .require_collection(&ctx.caller, Action::PartialUpdate, ResourceKind::Profile)?;
        let mut user = self.current(ctx).await?;
        patch.check()?;
        let previous = user.username.clone();
        user.apply_profile(patch);
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
        info!(user_id = user.id, "Profile updated");
        Ok(user)
    }

    async fn current(&self, ctx: &RequestContext) -> AppResult<User> {
        let id = ctx.principal()?.id;
        self.users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use yamdb_core::error::ErrorKind;
    use yamdb_entity::user::UserRole;

    use super::*;
    use crate::testing::Harness;

    fn service(h: &Harness) -> ProfileService {
        ProfileService::new(
            h.stores.users.clone(),
            h.stores.reviews.clone(),
            h.stores.comments.clone(),
            h.policy.clone(),
        )
    }

    #[tokio::test]
    async fn test_profile_cannot_change_role() {
        let h = Harness::new();
        let service = service(&h);
        h.seed_user("bob", UserRole::User).await;
        let bob = h.ctx("bob", UserRole::User, false).await;

        let patch: ProfilePatch =
            serde_json::from_str(r#"{"bio": "Люблю кино", "role": "admin"}"#).unwrap();
        let updated = service.update_me(&bob, patch).await.unwrap();
        assert_eq!(updated.bio, "Люблю кино");
        assert_eq!(updated.role, UserRole::User);
        assert_eq!(service.me(&bob).await.unwrap().bio, "Люблю кино");
    }

    #[tokio::test]
    async fn test_profile_requires_authentication() {
        let h = Harness::new();
        let service = service(&h);
        let err = service.me(&RequestContext::anonymous()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_profile_email_uniqueness() {
        let h = Harness::new();
        let service = service(&h);
        h.seed_user("bob", UserRole::User).await;
        h.seed_user("ann", UserRole::User).await;

        let err = service
            .update_me(
                &h.ctx("bob", UserRole::User, false).await,
                ProfilePatch {
                    email: Some("ANN@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.fields.contains_key("email"));
    }

    #[tokio::test]
    async fn test_rename_keeps_authored_content() {
        let h = Harness::new();
        let service = service(&h);
        let title = h.seed_title("Сталкер", Some("movie"), &[]).await;
        let review = h.seed_review(title.id, "bob", 8).await;
        h.seed_comment(review.id, "bob", "и еще").await;
        let bob = h.ctx("bob", UserRole::User, false).await;

        let renamed = service
            .update_me(
                &bob,
                ProfilePatch {
                    username: Some("robert".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.username, "robert");
        assert_eq!(service.me(&bob).await.unwrap().username, "robert");

        let stored = h.stores.reviews.find_by_id(&review.id).await.unwrap().unwrap();
        assert_eq!(stored.author, "robert");
        assert_eq!(stored.author_id, renamed.id);
        let comments = h
            .stores
            .comments
            .find_by_review(review.id, &Default::default())
            .await
            .unwrap();
        assert_eq!(comments.items[0].author, "robert");
    }
}
