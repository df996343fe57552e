//! Review and comment store contracts.

use async_trait::async_trait;

use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_entity::review::{Comment, Review};

/// Reviews keyed by id, ordered by id.
///
/// `create` must reject a second review of the same title by the same author id
/// with a `Conflict` error.
#[async_trait]
pub trait ReviewStore: Repository<Review, i64> {
    /// Reviews of one title.
    async fn find_by_title(
        &self,
        title_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>>;

    /// The review identity `author_id` wrote for `title_id`, if any.
    async fn find_by_title_and_author(
        &self,
        title_id: i64,
        author_id: i64,
    ) -> AppResult<Option<Review>>;

    /// Scores of every review of one title.
    async fn scores_for_title(&self, title_id: i64) -> AppResult<Vec<i32>>;

    /// Delete every review of a title. Returns the deleted ids.
    async fn delete_by_title(&self, title_id: i64) -> AppResult<Vec<i64>>;

    /// Delete every review by an author. Returns the deleted ids.
    async fn delete_by_author(&self, author_id: i64) -> AppResult<Vec<i64>>;

    /// Refresh the display username on every review by an author.
    /// Returns how many were touched.
    async fn rename_author(&self, author_id: i64, username: &str) -> AppResult<u64>;
}

/// Comments keyed by id, ordered by id.
#[async_trait]
pub trait CommentStore: Repository<Comment, i64> {
    /// Comments on one review.
    async fn find_by_review(
        &self,
        review_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>>;

    /// Delete every comment on the given reviews. Returns how many were deleted.
    async fn delete_by_reviews(&self, review_ids: &[i64]) -> AppResult<u64>;

    /// Delete every comment by an author. Returns how many were deleted.
    async fn delete_by_author(&self, author_id: i64) -> AppResult<u64>;

    /// Refresh the display username on every comment by an author.
    async fn rename_author(&self, author_id: i64, username: &str) -> AppResult<u64>;
}
