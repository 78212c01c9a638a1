//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{AuthenticatedUser, auth_middleware, require_admin, require_role};
pub use logging::logging_middleware;
