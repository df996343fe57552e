//! Social entities: reviews of titles and comments on reviews.

pub mod comment;
pub mod model;

pub use comment::{Comment, CommentPatch, NewComment};
pub use model::{NewReview, Review, ReviewPatch};
