//! Core traits defined in `yamdb-core` and implemented by other crates.

pub mod mailer;
pub mod repository;

pub use mailer::{MailMessage, Mailer};
pub use repository::Repository;
