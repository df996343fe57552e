//! # yamdb-service
//!
//! Business logic service layer for YaMDb. Each service runs the access
//! policy against the caller in its [`RequestContext`], validates input,
//! and orchestrates the stores to implement one resource's operations.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod catalog;
pub mod context;
pub mod social;
pub mod user;

#[cfg(test)]
mod testing;

pub use catalog::{CategoryService, GenreService, TitleService};
pub use context::RequestContext;
pub use social::{CommentService, ReviewService};
pub use user::{AdminUserService, ProfileService};
