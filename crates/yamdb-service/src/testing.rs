//! Shared fixtures for the service unit tests.

use std::sync::Arc;

use yamdb_auth::{AccessPolicy, Caller, Principal};
use yamdb_core::traits::Repository;
use yamdb_database::{MemoryStores, UserStore};
use yamdb_entity::catalog::Title;
use yamdb_entity::review::{Comment, NewComment, NewReview, Review};
use yamdb_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// In-memory stores plus the default policy.
pub(crate) struct Harness {
    pub stores: MemoryStores,
    pub policy: Arc<AccessPolicy>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            stores: MemoryStores::new(),
            policy: Arc::new(AccessPolicy::new()),
        }
    }

    pub async fn seed_title(&self, name: &str, category: Option<&str>, genres: &[&str]) -> Title {
        self.stores
            .titles
            .create(Title {
                id: 0,
                name: name.to_string(),
                year: 1979,
                description: None,
                category: category.map(String::from),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            })
            .await
            .unwrap()
    }

    pub async fn seed_review(&self, title_id: i64, author: &str, score: i32) -> Review {
        let author = self.user(author).await;
        self.stores
            .reviews
            .create(NewReview::new("text", score).into_review(title_id, author.id, &author.username))
            .await
            .unwrap()
    }

    pub async fn seed_comment(&self, review_id: i64, author: &str, text: &str) -> Comment {
        let author = self.user(author).await;
        self.stores
            .comments
            .create(NewComment::new(text).into_comment(review_id, author.id, &author.username))
            .await
            .unwrap()
    }

    pub async fn seed_user(&self, username: &str, role: UserRole) -> User {
        let mut user = User::new(username, format!("{username}@x.com"));
        user.role = role;
        self.stores.users.create(user).await.unwrap()
    }

    /// Context for an authenticated caller backed by a stored identity.
    pub async fn ctx(&self, username: &str, role: UserRole, is_superuser: bool) -> RequestContext {
        let user = self.user(username).await;
        RequestContext::new(Caller::Authenticated(Principal {
            id: user.id,
            username: user.username,
            role,
            is_superuser,
        }))
    }

    /// The stored identity with this username, created on first use.
    async fn user(&self, username: &str) -> User {
        match self.stores.users.find_by_username(username).await.unwrap() {
            Some(user) => user,
            None => self.seed_user(username, UserRole::User).await,
        }
    }
}
