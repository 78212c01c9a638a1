//! Deliverable handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{constants::MAX_UPLOAD_BODY_SIZE, state::AppState};

/// Deliverable routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handler::upload_deliverable).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE)),
        )
        .route("/link", post(handler::submit_link))
        .route("/{numero}", get(handler::list_team_deliverables))
}
