//! Store traits for all YaMDb entities.
//!
//! Each trait extends the generic [`Repository`](yamdb_core::traits::Repository)
//! with the lookups its service needs.

pub mod catalog;
pub mod review;
pub mod user;

pub use catalog::{CategoryStore, GenreStore, TitleFilter, TitleStore};
pub use review::{CommentStore, ReviewStore};
pub use user::UserStore;
