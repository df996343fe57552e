//! In-memory review and comment stores.

use async_trait::async_trait;
use tracing::debug;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_entity::review::{Comment, Review};
use yamdb_entity::validation::DUPLICATE_REVIEW;

use super::table::Table;
use crate::repositories::review::{CommentStore, ReviewStore};

/// Review store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    table: Table<i64, Review>,
}

impl MemoryReviewStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a review under its own id unless that id is already taken.
    ///
    /// Returns `false` when the id exists. The (title, author) rule still
    /// applies.
    pub async fn restore(&self, review: Review) -> AppResult<bool> {
        let mut rows = self.table.rows.write().await;
        if rows.contains_key(&review.id) {
            return Ok(false);
        }
        if rows
            .values()
            .any(|r| r.title_id == review.title_id && r.author_id == review.author_id)
        {
            return Err(AppError::conflict_on("non_field_errors", DUPLICATE_REVIEW));
        }
        self.table.advance_to(review.id);
        rows.insert(review.id, review);
        Ok(true)
    }

    async fn remove_where(&self, pred: impl Fn(&Review) -> bool) -> Vec<i64> {
        let mut rows = self.table.rows.write().await;
        let ids: Vec<i64> = rows.values().filter(|r| pred(r)).map(|r| r.id).collect();
        for id in &ids {
            rows.remove(id);
        }
        ids
    }
}

#[async_trait]
impl Repository<Review, i64> for MemoryReviewStore {
    async fn find_by_id(&self, id: &i64) -> AppResult<Option<Review>> {
        Ok(self.table.rows.read().await.get(id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Review>> {
        let rows = self.table.rows.read().await;
        Ok(PageResponse::paginate(rows.values().cloned().collect(), page))
    }

    async fn create(&self, mut review: Review) -> AppResult<Review> {
        let mut rows = self.table.rows.write().await;
        if rows
            .values()
            .any(|r| r.title_id == review.title_id && r.author_id == review.author_id)
        {
            return Err(AppError::conflict_on("non_field_errors", DUPLICATE_REVIEW));
        }
        review.id = self.table.next_id();
        rows.insert(review.id, review.clone());
        debug!(review_id = review.id, title_id = review.title_id, author = %review.author, "Inserted review");
        Ok(review)
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        let mut rows = self.table.rows.write().await;
        match rows.get_mut(&review.id) {
            Some(row) => {
                *row = review.clone();
                Ok(review)
            }
            None => Err(AppError::not_found(format!("Review {} not found", review.id))),
        }
    }

    async fn delete(&self, id: &i64) -> AppResult<bool> {
        Ok(self.table.rows.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.rows.read().await.len() as u64)
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn find_by_title(
        &self,
        title_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let rows = self.table.rows.read().await;
        let matched = rows
            .values()
            .filter(|r| r.title_id == title_id)
            .cloned()
            .collect();
        Ok(PageResponse::paginate(matched, page))
    }

    async fn find_by_title_and_author(
        &self,
        title_id: i64,
        author_id: i64,
    ) -> AppResult<Option<Review>> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .values()
            .find(|r| r.title_id == title_id && r.author_id == author_id)
            .cloned())
    }

    async fn scores_for_title(&self, title_id: i64) -> AppResult<Vec<i32>> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .values()
            .filter(|r| r.title_id == title_id)
            .map(|r| r.score)
            .collect())
    }

    async fn delete_by_title(&self, title_id: i64) -> AppResult<Vec<i64>> {
        Ok(self.remove_where(|r| r.title_id == title_id).await)
    }

    async fn delete_by_author(&self, author_id: i64) -> AppResult<Vec<i64>> {
        Ok(self.remove_where(|r| r.author_id == author_id).await)
    }

    async fn rename_author(&self, author_id: i64, username: &str) -> AppResult<u64> {
        let mut rows = self.table.rows.write().await;
        let mut touched = 0;
        for review in rows.values_mut().filter(|r| r.author_id == author_id) {
            review.author = username.to_string();
            touched += 1;
        }
        Ok(touched)
    }
}

/// Comment store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryCommentStore {
    table: Table<i64, Comment>,
}

impl MemoryCommentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a comment under its own id unless that id is already taken.
    pub async fn restore(&self, comment: Comment) -> AppResult<bool> {
        let mut rows = self.table.rows.write().await;
        if rows.contains_key(&comment.id) {
            return Ok(false);
        }
        self.table.advance_to(comment.id);
        rows.insert(comment.id, comment);
        Ok(true)
    }

    async fn remove_where(&self, pred: impl Fn(&Comment) -> bool) -> u64 {
        let mut rows = self.table.rows.write().await;
        let before = rows.len();
        rows.retain(|_, c| !pred(c));
        (before - rows.len()) as u64
    }
}

#[async_trait]
impl Repository<Comment, i64> for MemoryCommentStore {
    async fn find_by_id(&self, id: &i64) -> AppResult<Option<Comment>> {
        Ok(self.table.rows.read().await.get(id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Comment>> {
        let rows = self.table.rows.read().await;
        Ok(PageResponse::paginate(rows.values().cloned().collect(), page))
    }

    async fn create(&self, mut comment: Comment) -> AppResult<Comment> {
        let mut rows = self.table.rows.write().await;
        comment.id = self.table.next_id();
        rows.insert(comment.id, comment.clone());
        debug!(comment_id = comment.id, review_id = comment.review_id, "Inserted comment");
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> AppResult<Comment> {
        let mut rows = self.table.rows.write().await;
        match rows.get_mut(&comment.id) {
            Some(row) => {
                *row = comment.clone();
                Ok(comment)
            }
            None => Err(AppError::not_found(format!(
                "Comment {} not found",
                comment.id
            ))),
        }
    }

    async fn delete(&self, id: &i64) -> AppResult<bool> {
        Ok(self.table.rows.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.rows.read().await.len() as u64)
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn find_by_review(
        &self,
        review_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        let rows = self.table.rows.read().await;
        let matched = rows
            .values()
            .filter(|c| c.review_id == review_id)
            .cloned()
            .collect();
        Ok(PageResponse::paginate(matched, page))
    }

    async fn delete_by_reviews(&self, review_ids: &[i64]) -> AppResult<u64> {
        if review_ids.is_empty() {
            return Ok(0);
        }
        Ok(self.remove_where(|c| review_ids.contains(&c.review_id)).await)
    }

    async fn delete_by_author(&self, author_id: i64) -> AppResult<u64> {
        Ok(self.remove_where(|c| c.author_id == author_id).await)
    }

    async fn rename_author(&self, author_id: i64, username: &str) -> AppResult<u64> {
        let mut rows = self.table.rows.write().await;
        let mut touched = 0;
        for comment in rows.values_mut().filter(|c| c.author_id == author_id) {
            comment.author = username.to_string();
            touched += 1;
        }
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use yamdb_core::error::ErrorKind;
    use yamdb_entity::review::{NewComment, NewReview};

    use super::*;

    #[tokio::test]
    async fn test_one_review_per_title_and_author() {
        let store = MemoryReviewStore::new();
        store
            .create(NewReview::new("great", 9).into_review(5, 1, "alice"))
            .await
            .unwrap();
        store
            .create(NewReview::new("fine", 6).into_review(6, 1, "alice"))
            .await
            .unwrap();
        store
            .create(NewReview::new("meh", 4).into_review(5, 2, "carol"))
            .await
            .unwrap();

        let err = store
            .create(NewReview::new("again", 1).into_review(5, 1, "alice"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(
            err.fields["non_field_errors"],
            vec![DUPLICATE_REVIEW.to_string()]
        );

        let mut scores = store.scores_for_title(5).await.unwrap();
        scores.sort();
        assert_eq!(scores, vec![4, 9]);
        assert!(
            store
                .find_by_title_and_author(6, 1)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_concurrent_reviews_single_winner() {
        let store = Arc::new(MemoryReviewStore::new());
        let mut handles = Vec::new();
        for score in 1..=6 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(NewReview::new("race", score).into_review(5, 1, "alice"))
                    .await
            }));
        }
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.scores_for_title(5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cascading_deletes() {
        let reviews = MemoryReviewStore::new();
        let comments = MemoryCommentStore::new();
        let first = reviews
            .create(NewReview::new("a", 5).into_review(1, 1, "alice"))
            .await
            .unwrap();
        let second = reviews
            .create(NewReview::new("b", 5).into_review(2, 1, "alice"))
            .await
            .unwrap();
        comments
            .create(NewComment::new("c1").into_comment(first.id, 3, "bob"))
            .await
            .unwrap();
        comments
            .create(NewComment::new("c2").into_comment(second.id, 1, "alice"))
            .await
            .unwrap();

        let removed = reviews.delete_by_title(1).await.unwrap();
        assert_eq!(removed, vec![first.id]);
        assert_eq!(comments.delete_by_reviews(&removed).await.unwrap(), 1);
        assert_eq!(comments.delete_by_reviews(&[]).await.unwrap(), 0);

        assert_eq!(comments.delete_by_author(1).await.unwrap(), 1);
        assert_eq!(reviews.delete_by_author(1).await.unwrap(), vec![second.id]);
        assert_eq!(comments.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rename_author_keeps_ownership() {
        let reviews = MemoryReviewStore::new();
        let comments = MemoryCommentStore::new();
        let review = reviews
            .create(NewReview::new("a", 5).into_review(1, 1, "alice"))
            .await
            .unwrap();
        comments
            .create(NewComment::new("c").into_comment(review.id, 1, "alice"))
            .await
            .unwrap();
        comments
            .create(NewComment::new("d").into_comment(review.id, 2, "carol"))
            .await
            .unwrap();

        assert_eq!(reviews.rename_author(1, "alice2").await.unwrap(), 1);
        assert_eq!(comments.rename_author(1, "alice2").await.unwrap(), 1);

        let stored = reviews.find_by_id(&review.id).await.unwrap().unwrap();
        assert_eq!(stored.author, "alice2");
        assert_eq!(stored.author_id, 1);

        // A different identity with the old name is a different author.
        reviews
            .create(NewReview::new("b", 7).into_review(1, 4, "alice"))
            .await
            .unwrap();
        assert_eq!(reviews.scores_for_title(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_restore_keeps_ids_and_skips_existing() {
        let reviews = MemoryReviewStore::new();
        let mut review = NewReview::new("a", 5).into_review(1, 1, "alice");
        review.id = 7;
        assert!(reviews.restore(review.clone()).await.unwrap());
        assert!(!reviews.restore(review).await.unwrap());

        let next = reviews
            .create(NewReview::new("b", 6).into_review(1, 2, "carol"))
            .await
            .unwrap();
        assert_eq!(next.id, 8);
    }

    #[tokio::test]
    async fn test_comments_scoped_to_review() {
        let comments = MemoryCommentStore::new();
        comments
            .create(NewComment::new("x").into_comment(1, 3, "bob"))
            .await
            .unwrap();
        comments
            .create(NewComment::new("y").into_comment(2, 3, "bob"))
            .await
            .unwrap();
        let page = comments
            .find_by_review(2, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].text, "y");
    }
}
