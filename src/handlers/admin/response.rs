//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Judge, Phase, PhaseWindow, Team};

/// Team response
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub numero: i32,
    pub name: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            numero: team.numero,
            name: team.name,
        }
    }
}

/// Judge directory entry response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeResponse {
    pub email: String,
    pub conflict_team_numeros: Vec<i32>,
}

impl From<Judge> for JudgeResponse {
    fn from(judge: Judge) -> Self {
        Self {
            email: judge.email,
            conflict_team_numeros: judge.conflict_team_numbers,
        }
    }
}

/// Phase window response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseWindowResponse {
    pub phase: Phase,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl From<PhaseWindow> for PhaseWindowResponse {
    fn from(window: PhaseWindow) -> Self {
        Self {
            phase: window.phase,
            starts_at: window.starts_at,
            ends_at: window.ends_at,
        }
    }
}
