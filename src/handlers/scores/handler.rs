//! Score handler implementations

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::{error::AppResult, middleware::AuthenticatedUser, state::AppState};

use super::{request::SubmitScoreRequest, response::SubmitScoreResponse};

/// Submit (or resubmit) a score for a team and phase
pub async fn submit_score(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> AppResult<Json<SubmitScoreResponse>> {
    let Json(payload) = payload?;
    payload.validate()?;

    state.scoring().submit(&auth_user, payload.into()).await?;

    Ok(Json(SubmitScoreResponse { ok: true }))
}
