//! # yamdb-mail
//!
//! Mail backends for YaMDb. The backend is selected at runtime from
//! `mail.backend`:
//!
//! - **log**: messages are written to the application log
//! - **file**: one file per message in a directory
//! - **memory**: an in-process outbox, used by the test suites

pub mod file;
pub mod log;
pub mod manager;
pub mod memory;

pub use file::FileMailer;
pub use log::LogMailer;
pub use manager::MailManager;
pub use memory::MemoryMailer;
