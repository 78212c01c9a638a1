//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
    models::Role,
    services::CreateUser,
};

/// Create user request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,

    pub role: Role,

    pub team_numero: Option<i32>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
            role: req.role,
            team_numero: req.team_numero,
        }
    }
}

/// Create team request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    pub numero: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
}

/// Replace a judge's conflict set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConflictsRequest {
    pub team_numeros: Vec<i32>,
}

/// Configure a phase window; `[startsAt, endsAt)`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWindowRequest {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
