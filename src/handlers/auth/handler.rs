//! Authentication handler implementations

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    state::AppState,
};

use super::{
    request::LoginRequest,
    response::{LoginResponse, MeResponse},
};

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload?;

    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(AppError::MissingFields("email, password".to_string())),
    };

    let (user, issued) = state.auth().login(&email, &password).await?;

    Ok(Json(LoginResponse {
        ok: true,
        token: issued.token,
        expires_in: issued.expires_in,
        user: user.into(),
    }))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MeResponse>> {
    let user = state.auth().current_user(auth_user.id).await?;
    Ok(Json(MeResponse {
        ok: true,
        user: user.into(),
    }))
}
