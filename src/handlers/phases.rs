//! Phase status handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{error::AppResult, models::Phase, state::AppState};

/// Whether a phase currently accepts submissions
#[derive(Debug, Serialize)]
pub struct PhaseStatusResponse {
    pub phase: Phase,
    pub open: bool,
}

async fn list_phases(State(state): State<AppState>) -> AppResult<Json<Vec<PhaseStatusResponse>>> {
    let mut phases = Vec::with_capacity(Phase::ALL.len());
    for phase in Phase::ALL {
        phases.push(PhaseStatusResponse {
            phase,
            open: state.phase_gate().is_open(phase).await?,
        });
    }
    Ok(Json(phases))
}

/// Phase routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/phases", get(list_phases))
}
