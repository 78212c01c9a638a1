//! Deliverable handler implementations

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    services::FileUpload,
    state::AppState,
};

use super::{
    request::{SubmitLinkRequest, fields},
    response::{DeliverableResponse, TeamDeliverablesResponse},
};

/// Upload a PDF deliverable (multipart: teamNumero, type, file)
pub async fn upload_deliverable(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<DeliverableResponse>)> {
    let mut multipart = multipart?;
    let mut team_numero = None;
    let mut deliverable_type = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(fields::TEAM_NUMERO) => {
                let raw = field.text().await?;
                let numero = raw
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::Validation(format!("Invalid team number: {}", raw)))?;
                team_numero = Some(numero);
            }
            Some(fields::TYPE) => deliverable_type = Some(field.text().await?.trim().to_string()),
            Some(fields::FILE) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(team_numero), Some(deliverable_type), Some((content_type, bytes))) =
        (team_numero, deliverable_type, file)
    else {
        return Err(AppError::MissingFields(format!(
            "{}, {}, {}",
            fields::TEAM_NUMERO,
            fields::TYPE,
            fields::FILE
        )));
    };

    let deliverable = state
        .deliverables()
        .submit_file(
            &auth_user,
            FileUpload {
                team_numero,
                deliverable_type,
                content_type,
                bytes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(deliverable.into())))
}

/// Submit the MVP link
pub async fn submit_link(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Result<Json<SubmitLinkRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DeliverableResponse>)> {
    let Json(payload) = payload?;

    let (Some(team_numero), Some(url)) = (payload.team_numero, payload.url) else {
        return Err(AppError::MissingFields("teamNumero, url".to_string()));
    };

    let deliverable = state
        .deliverables()
        .submit_link(&auth_user, team_numero, &url)
        .await?;

    Ok((StatusCode::CREATED, Json(deliverable.into())))
}

/// List the current deliverables of a team
pub async fn list_team_deliverables(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    numero: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<TeamDeliverablesResponse>> {
    let Path(numero) = numero?;

    let deliverables = state.deliverables().list_for_team(&auth_user, numero).await?;

    Ok(Json(TeamDeliverablesResponse {
        team_numero: numero,
        deliverables: deliverables.into_iter().map(Into::into).collect(),
    }))
}
