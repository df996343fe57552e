//! Identity store contract.

use async_trait::async_trait;

use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_entity::user::User;

/// Keyed identity records.
///
/// `create` and `update` must enforce username and email uniqueness
/// atomically, reporting a violation as a `Conflict` error attached to the
/// offending field. Of two concurrent inserts for the same email exactly one
/// succeeds.
#[async_trait]
pub trait UserStore: Repository<User, i64> {
    /// Find an identity by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find an identity by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}
