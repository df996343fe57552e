//! # yamdb-auth
//!
//! Authentication and authorization for YaMDb.
//!
//! ## Modules
//!
//! - `exchange`: signup with emailed confirmation codes, code-for-token
//!   exchange, token refresh, and bearer authentication
//! - `jwt`: JWT token creation and validation
//! - `code`: confirmation code generation
//! - `caller`: the identity a request is evaluated for
//! - `rbac`: role-based access policy with authorship checks

pub mod caller;
pub mod code;
pub mod exchange;
pub mod jwt;
pub mod rbac;

pub use caller::{Caller, Principal};
pub use exchange::{AuthExchange, RefreshRequest, SignupReceipt, TokenRequest};
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use rbac::{AccessDecision, AccessPolicies, AccessPolicy, Action, Denial, PolicyRule, ResourceKind};
