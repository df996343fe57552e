//! Reviews of a title: anyone reads, authenticated users write, and only the
//! author or staff may modify an existing review.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{CommentStore, ReviewStore, TitleStore};
use yamdb_entity::review::{NewReview, Review, ReviewPatch};
use yamdb_entity::validation::DUPLICATE_REVIEW;

use crate::context::RequestContext;

/// Handles review operations nested under a title.
#[derive(Debug, Clone)]
pub struct ReviewService {
    /// Title store, for resolving the parent.
    titles: Arc<dyn TitleStore>,
    /// Review store.
    reviews: Arc<dyn ReviewStore>,
    /// Comment store, for cascading deletes.
    comments: Arc<dyn CommentStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl ReviewService {
    /// Creates a new review service.
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

    /// Lists the reviews of a title.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::Review)?;
        self.ensure_title(title_id).await?;
        self.reviews.find_by_title(title_id, page).await
    }

    /// Gets one review of a title.
    pub async fn retrieve(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
    ) -> AppResult<Review> {
        self.target(ctx, Action::Retrieve, title_id, review_id).await
    }

    /// Creates a review authored by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        input: NewReview,
    ) -> AppResult<Review> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::Review)?;
        self.ensure_title(title_id).await?;
        input.check()?;
        let author = ctx.principal()?;
        if self
            .reviews
            .find_by_title_and_author(title_id, author.id)
            .await?
            .is_some()
        {
            return Err(AppError::invalid_field("non_field_errors", DUPLICATE_REVIEW));
        }
        let review = self
            .reviews
            .create(input.into_review(title_id, author.id, &author.username))
            .await
            .map_err(AppError::into_validation)?;
        info!(review_id = review.id, title_id, author = %review.author, "Review created");
        Ok(review)
    }

    /// Replaces the text and score of a review.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        input: NewReview,
    ) -> AppResult<Review> {
        let mut review = self.target(ctx, Action::Update, title_id, review_id).await?;
        input.check()?;
        review.apply(ReviewPatch::from(input));
        let review = self.reviews.update(review).await?;
        info!(review_id = review.id, "Review updated");
        Ok(review)
    }

    /// Changes the fields present in the patch.
    pub async fn partial_update(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
        patch: ReviewPatch,
    ) -> AppResult<Review> {
        let mut review = self
            .target(ctx, Action::PartialUpdate, title_id, review_id)
            .await?;
        patch.check()?;
        review.apply(patch);
        let review = self.reviews.update(review).await?;
        info!(review_id = review.id, "Review patched");
        Ok(review)
    }

    /// Deletes a review and its comments.
    pub async fn destroy(
        &self,
        ctx: &RequestContext,
        title_id: i64,
        review_id: i64,
    ) -> AppResult<()> {
        let review = self
            .target(ctx, Action::Destroy, title_id, review_id)
            .await?;
        let comments = self.comments.delete_by_reviews(&[review.id]).await?;
        self.reviews.delete(&review.id).await?;
        info!(review_id = review.id, comments, "Review deleted");
        Ok(())
    }

    async fn ensure_title(&self, title_id: i64) -> AppResult<()> {
        match self.titles.find_by_id(&title_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Title {title_id} not found"))),
        }
    }

    /// Collection check, parent lookup, target lookup, then object check.
    async fn target(
        &self,
        ctx: &RequestContext,
        action: Action,
        title_id: i64,
        review_id: i64,
    ) -> AppResult<Review> {
        self.policy
            .require_collection(&ctx.caller, action, ResourceKind::Review)?;
        self.ensure_title(title_id).await?;
        let review = self
            .reviews
            .find_by_id(&review_id)
            .await?
            .filter(|r| r.title_id == title_id)
            .ok_or_else(|| AppError::not_found(format!("Review {review_id} not found")))?;
        self.policy
            .require_object(&ctx.caller, action, ResourceKind::Review, &review)?;
        Ok(review)
    }
}
