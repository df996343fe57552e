//! User administration and self-service profile.

pub mod admin;
pub mod profile;

pub use admin::AdminUserService;
pub use profile::ProfileService;
