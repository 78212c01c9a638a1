//! Admin management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/users", post(handler::create_user))
        .route("/users/{id}/deactivate", post(handler::deactivate_user))
        // Directory
        .route("/teams", post(handler::create_team))
        .route("/judges/{email}/conflicts", put(handler::set_judge_conflicts))
        // Phase windows
        .route(
            "/phases/{phase}/window",
            put(handler::set_phase_window).delete(handler::clear_phase_window),
        )
}
