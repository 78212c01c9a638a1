//! Ranking handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{error::AppResult, models::TeamStanding, state::AppState};

/// Ranking response
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub ranking: Vec<TeamStanding>,
}

/// Current team standings, best first
async fn get_ranking(State(state): State<AppState>) -> AppResult<Json<RankingResponse>> {
    let ranking = state.ranking().standings().await?;
    Ok(Json(RankingResponse { ranking }))
}

/// Ranking routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/ranking", get(get_ranking))
}
