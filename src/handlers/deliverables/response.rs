//! Deliverable response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Deliverable, DeliverableType};

/// A recorded deliverable
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub deliverable_type: DeliverableType,
    pub value: String,
    pub submitted_at: DateTime<Utc>,
    pub is_late: bool,
    pub submitted_by: Uuid,
}

impl From<Deliverable> for DeliverableResponse {
    fn from(d: Deliverable) -> Self {
        Self {
            id: d.id,
            deliverable_type: d.deliverable_type,
            value: d.value,
            submitted_at: d.submitted_at,
            is_late: d.is_late,
            submitted_by: d.submitted_by,
        }
    }
}

/// Deliverables of one team
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDeliverablesResponse {
    pub team_numero: i32,
    pub deliverables: Vec<DeliverableResponse>,
}
