//! Reviews of titles and the comments under them.

pub mod comment;
pub mod review;

pub use comment::CommentService;
pub use review::ReviewService;
