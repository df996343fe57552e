//! In-memory store implementations.
//!
//! Every table is a `BTreeMap` behind a `tokio::sync::RwLock`. Uniqueness
//! checks and the insert they guard happen under one write lock, which is
//! what makes concurrent inserts resolve to a single winner.

mod table;

pub mod catalog;
pub mod review;
pub mod user;

use std::sync::Arc;

pub use catalog::{MemoryCategoryStore, MemoryGenreStore, MemoryTitleStore};
pub use review::{MemoryCommentStore, MemoryReviewStore};
pub use user::MemoryUserStore;

/// One instance of every in-memory store, shared via `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    /// Identities.
    pub users: Arc<MemoryUserStore>,
    /// Categories.
    pub categories: Arc<MemoryCategoryStore>,
    /// Genres.
    pub genres: Arc<MemoryGenreStore>,
    /// Titles.
    pub titles: Arc<MemoryTitleStore>,
    /// Reviews.
    pub reviews: Arc<MemoryReviewStore>,
    /// Comments.
    pub comments: Arc<MemoryCommentStore>,
}

impl MemoryStores {
    /// Create an empty set of stores.
    pub fn new() -> Self {
        Self::default()
    }
}
