//! Health reporting

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::{config::ScorePolicy, state::AppState};

/// Health report
///
/// Carries the judging policies operators need to see, in particular whether
/// phase windows fail open while the store is unreachable.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub score_policy: ScorePolicy,
    pub window_fail_open: bool,
}

/// 200 when the store answers, 503 otherwise
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match state.store_health().ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check: store unreachable");
            false
        }
    };

    let judging = &state.config().judging;
    let (code, status, database) = if reachable {
        (StatusCode::OK, "healthy", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            score_policy: judging.score_policy,
            window_fail_open: judging.window_fail_open,
        }),
    )
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
