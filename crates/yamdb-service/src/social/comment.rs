//! Comments on a review, nested under its title.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{CommentStore, ReviewStore, TitleStore};
use yamdb_entity::review::{Comment, CommentPatch, NewComment, Review};

use crate::context::RequestContext;

/// Handles comment operations nested under a title and review.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Title store, for resolving the grandparent.
    titles: Arc<dyn TitleStore>,
    /// Review store, for resolving the parent.
    reviews: Arc<dyn ReviewStore>,
    /// Comment store.
    comments: Arc<dyn CommentStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        titles: Arc<dyn TitleStore>,
        reviews: Arc<dyn ReviewStore>,
        comments: Arc<dyn CommentStore>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            titles,
            reviews,
            comments,
            policy,
        }
    }

    /// Lists the comments on a review.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::Comment)?;
        let review = self.parent(title_id, review_id).await?;
        self.comments.find_by_review(review.id, page).await
    }

    /// Gets one comment.
    pub async fn retrieve(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
    ) -> AppResult<Comment> {
        self.target(ctx, Action::Retrieve, title_id, review_id, comment_id)
            .await
    }

    /// Creates a comment authored by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        input: NewComment,
    ) -> AppResult<Comment> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::Comment)?;
        let review = self.parent(title_id, review_id).await?;
        input.check()?;
        let author = ctx.principal()?;
        let comment = self
            .comments
            .create(input.into_comment(review.id, author.id, &author.username))
            .await?;
        info!(comment_id = comment.id, review_id, author = %comment.author, "Comment created");
        Ok(comment)
    }

    /// Replaces the text of a comment.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
        input: NewComment,
    ) -> AppResult<Comment> {
        let comment = self
            .target(ctx, Action::Update, title_id, review_id, comment_id)
            .await?;
        input.check()?;
        self.save(comment, CommentPatch::from(input)).await
    }

    /// Changes the fields present in the patch.
    pub async fn partial_update(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
        patch: CommentPatch,
    ) -> AppResult<Comment> {
        let comment = self
            .target(ctx, Action::PartialUpdate, title_id, review_id, comment_id)
            .await?;
        patch.check()?;
        self.save(comment, patch).await
    }

    /// Deletes a comment.
    pub async fn destroy(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
    ) -> AppResult<()> {
        let comment = self
            .target(ctx, Action::Destroy, title_id, review_id, comment_id)
            .await?;
        self.comments.delete(&comment.id).await?;
        info!(comment_id = comment.id, "Comment deleted");
        Ok(())
    }

    async fn save(&self, mut comment: Comment, patch: CommentPatch) -> AppResult<Comment> {
        if let Some(text) = patch.text {
            comment.text = text;
        }
        let comment = self.comments.update(comment).await?;
        info!(comment_id = comment.id, "Comment updated");
        Ok(comment)
    }

    /// The review, which must exist and belong to the title.
    async fn parent(&self, title_id: i64, review_id: i64) -> AppResult<Review> {
        if self.titles.find_by_id(&title_id).await?.is_none() {
            return Err(AppError::not_found(format!("Title {title_id} not found")));
        }
        self.reviews
            .find_by_id(&review_id)
            .await?
            .filter(|r| r.title_id == title_id)
            .ok_or_else(|| AppError::not_found(format!("Review {review_id} not found")))
    }

    async fn target(
        &self,
        ctx: &RequestContext,
        action: Action,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
    ) -> AppResult<Comment> {
        self.policy
            .require_collection(&ctx.caller, action, ResourceKind::Comment)?;
        let review = self.parent(title_id, review_id).await?;
        let comment = self
            .comments
            .find_by_id(&comment_id)
            .await?
            .filter(|c| c.review_id == review.id)
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;
        self.policy
            .require_object(&ctx.caller, action, ResourceKind::Comment, &comment)?;
        Ok(comment)
    }
}
