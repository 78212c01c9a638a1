//! Score request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_NOTES_LENGTH,
    models::RawScoreFields,
    services::ScoreSubmission,
};

/// Score submission request
///
/// Score values are accepted as any integer and clamped later; fields that do
/// not belong to the submitted phase are ignored.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub team_numero: Option<i32>,
    pub phase: Option<String>,
    pub judge_email_override: Option<String>,

    pub canvas_score: Option<i64>,
    pub mvp_score: Option<i64>,
    pub impact: Option<i64>,
    pub business_model: Option<i64>,
    pub innovation: Option<i64>,
    pub viability: Option<i64>,
    pub extra_criterion: Option<i64>,

    #[validate(length(max = MAX_NOTES_LENGTH))]
    pub notes: Option<String>,
}

impl From<SubmitScoreRequest> for ScoreSubmission {
    fn from(req: SubmitScoreRequest) -> Self {
        Self {
            judge_email_override: req.judge_email_override,
            team_numero: req.team_numero,
            phase: req.phase,
            fields: RawScoreFields {
                canvas_score: req.canvas_score,
                mvp_score: req.mvp_score,
                impact: req.impact,
                business_model: req.business_model,
                innovation: req.innovation,
                viability: req.viability,
                extra_criterion: req.extra_criterion,
            },
            notes: req.notes,
        }
    }
}
