//! User domain entities.

pub mod model;
pub mod role;

pub use model::{NewUser, ProfilePatch, SignupRequest, User, UserPatch};
pub use role::UserRole;
