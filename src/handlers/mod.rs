//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod deliverables;
pub mod health;
pub mod phases;
pub mod ranking;
pub mod scores;

use axum::{Router, middleware};

use crate::{
    middleware::{auth_middleware, require_admin},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let authenticated = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .merge(health::routes())
        .merge(auth::protected_routes().route_layer(authenticated.clone()))
        .nest(
            "/auth",
            auth::public_routes().merge(auth::protected_routes().route_layer(authenticated.clone())),
        )
        .nest("/scores", scores::routes().route_layer(authenticated.clone()))
        .nest("/deliverables", deliverables::routes().route_layer(authenticated.clone()))
        .merge(
            ranking::routes()
                .merge(phases::routes())
                .route_layer(authenticated.clone()),
        )
        .nest(
            "/admin",
            admin::routes()
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(authenticated),
        )
}
