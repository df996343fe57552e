//! # yamdb-core
//!
//! Core crate for the YaMDb reviews backend. Contains the repository and
//! mailer traits, configuration schemas, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other YaMDb crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
