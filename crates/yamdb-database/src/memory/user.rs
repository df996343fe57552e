//! In-memory identity store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_entity::user::User;
use yamdb_entity::validation::{EMAIL_TAKEN, USERNAME_TAKEN};

use super::table::Table;
use crate::repositories::user::UserStore;

/// Identity store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: Table<i64, User>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity under its own id unless that id is already taken.
    ///
    /// Returns `false` when the id exists. Username and email uniqueness
    /// still apply.
    pub async fn restore(&self, mut user: User) -> AppResult<bool> {
        let mut rows = self.table.rows.write().await;
        if rows.contains_key(&user.id) {
            return Ok(false);
        }
        user.email = user.email.to_lowercase();
        ensure_unique(&rows, &user)?;
        self.table.advance_to(user.id);
        rows.insert(user.id, user);
        Ok(true)
    }
}

/// Reject `user` if another row already holds its username or email.
fn ensure_unique(rows: &BTreeMap<i64, User>, user: &User) -> AppResult<()> {
    let email = user.email.to_lowercase();
    for other in rows.values().filter(|other| other.id != user.id) {
        if other.username == user.username {
            return Err(AppError::conflict_on("username", USERNAME_TAKEN));
        }
        if other.email == email {
            return Err(AppError::conflict_on("email", EMAIL_TAKEN));
        }
    }
    Ok(())
}

#[async_trait]
impl Repository<User, i64> for MemoryUserStore {
    async fn find_by_id(&self, id: &i64) -> AppResult<Option<User>> {
        Ok(self.table.rows.read().await.get(id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let rows = self.table.rows.read().await;
        Ok(PageResponse::paginate(rows.values().cloned().collect(), page))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut rows = self.table.rows.write().await;
        user.id = 0;
        user.email = user.email.to_lowercase();
        ensure_unique(&rows, &user)?;
        user.id = self.table.next_id();
        rows.insert(user.id, user.clone());
        debug!(user_id = user.id, username = %user.username, "Inserted user");
        Ok(user)
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        let mut rows = self.table.rows.write().await;
        if !rows.contains_key(&user.id) {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        user.email = user.email.to_lowercase();
        ensure_unique(&rows, &user)?;
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &i64) -> AppResult<bool> {
        Ok(self.table.rows.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.rows.read().await.len() as u64)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let rows = self.table.rows.read().await;
        Ok(rows.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let rows = self.table.rows.read().await;
        Ok(rows.values().find(|u| u.email == email).cloned())
    }
}
