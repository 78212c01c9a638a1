//! Admin handler implementations

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::auth::UserResponse,
    models::Phase,
    state::AppState,
};

use super::{
    request::{CreateTeamRequest, CreateUserRequest, SetConflictsRequest, SetWindowRequest},
    response::{JudgeResponse, PhaseWindowResponse, TeamResponse},
};

/// Create a user account
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state.admin().create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Deactivate a user account
pub async fn deactivate_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.admin().deactivate_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a team
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TeamResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let team = state.admin().create_team(payload.numero, &payload.name).await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Replace the conflict set of a judge
pub async fn set_judge_conflicts(
    State(state): State<AppState>,
    email: Result<Path<String>, PathRejection>,
    payload: Result<Json<SetConflictsRequest>, JsonRejection>,
) -> AppResult<Json<JudgeResponse>> {
    let Path(email) = email?;
    let Json(payload) = payload?;

    let judge = state
        .admin()
        .set_judge_conflicts(&email, payload.team_numeros)
        .await?;

    Ok(Json(judge.into()))
}

/// Set the submission window of a phase
pub async fn set_phase_window(
    State(state): State<AppState>,
    phase: Result<Path<String>, PathRejection>,
    payload: Result<Json<SetWindowRequest>, JsonRejection>,
) -> AppResult<Json<PhaseWindowResponse>> {
    let phase = parse_phase(phase?)?;
    let Json(payload) = payload?;

    let window = state
        .admin()
        .set_phase_window(phase, payload.starts_at, payload.ends_at)
        .await?;

    Ok(Json(window.into()))
}

/// Remove the submission window of a phase
pub async fn clear_phase_window(
    State(state): State<AppState>,
    phase: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let phase = parse_phase(phase?)?;
    state.admin().clear_phase_window(phase).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_phase(Path(raw): Path<String>) -> AppResult<Phase> {
    Phase::parse(&raw).ok_or(AppError::InvalidPhase(raw))
}
