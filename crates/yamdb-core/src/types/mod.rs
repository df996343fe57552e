//! Core type definitions used across the YaMDb workspace.

pub mod pagination;
pub mod response;

pub use pagination::{PageRequest, PageResponse};
pub use response::ErrorBody;
