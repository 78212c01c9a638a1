//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Public authentication routes
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", post(handler::login))
}

/// Authentication routes that need a resolved identity
///
/// Mounted both at the root (`/me`) and under `/auth`.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/me", get(handler::get_current_user))
}
