//! # yamdb-entity
//!
//! Domain entity models for the YaMDb reviews backend. Every struct in this
//! crate is either a stored record or an input shape for creating or
//! patching one. Input shapes carry their own field validation and report
//! failures as per-field [`AppError`](yamdb_core::AppError) messages.

pub mod authored;
pub mod catalog;
pub mod review;
pub mod user;
pub mod validation;

pub use authored::Authored;
