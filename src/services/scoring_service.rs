//! Score submission pipeline
//!
//! Validates a judge's score against role, directory, conflict-of-interest
//! and per-phase field rules, then writes it with a single statement keyed by
//! (judge, team, phase).

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::ScorePolicy,
    db::{Directory, ScoreStore},
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    models::{NewScore, Phase, RawScoreFields, Role, ScoreFields, normalize_email},
};

/// A score submission as received from a client
#[derive(Debug, Clone, Default)]
pub struct ScoreSubmission {
    pub judge_email_override: Option<String>,
    pub team_numero: Option<i32>,
    pub phase: Option<String>,
    pub fields: RawScoreFields,
    pub notes: Option<String>,
}

/// Scoring service
#[derive(Clone)]
pub struct ScoringService {
    directory: Arc<dyn Directory>,
    scores: Arc<dyn ScoreStore>,
    policy: ScorePolicy,
}

impl ScoringService {
    pub fn new(directory: Arc<dyn Directory>, scores: Arc<dyn ScoreStore>, policy: ScorePolicy) -> Self {
        Self {
            directory,
            scores,
            policy,
        }
    }

    /// Validate and record a score
    pub async fn submit(&self, caller: &AuthenticatedUser, submission: ScoreSubmission) -> AppResult<()> {
        if !caller.role.can_score() {
            return Err(AppError::Forbidden("Only judges and admins can submit scores".to_string()));
        }
        let judge_email = effective_judge_email(caller, submission.judge_email_override.as_deref());

        let (team_numero, phase) = match (submission.team_numero, submission.phase.as_deref()) {
            (Some(numero), Some(phase)) => (numero, phase),
            (numero, phase) => {
                let missing: Vec<&str> = [
                    numero.is_none().then_some("teamNumero"),
                    phase.is_none().then_some("phase"),
                ]
                .into_iter()
                .flatten()
                .collect();
                return Err(AppError::MissingFields(missing.join(", ")));
            }
        };
        let phase = Phase::parse(phase).ok_or_else(|| AppError::InvalidPhase(phase.to_string()))?;

        let judge = self
            .directory
            .resolve_judge(&judge_email)
            .await?
            .ok_or_else(|| AppError::JudgeNotFound(judge_email.clone()))?;

        if judge.has_conflict_with(team_numero) {
            warn!(judge = %judge.email, team_numero, "Score rejected: conflict of interest");
            return Err(AppError::ConflictOfInterest(team_numero));
        }

        let team = self
            .directory
            .resolve_team(team_numero)
            .await?
            .ok_or(AppError::TeamNotFound(team_numero))?;

        let score = NewScore {
            judge_id: judge.id,
            team_id: team.id,
            phase,
            fields: ScoreFields::normalize(phase, &submission.fields),
            notes: submission
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        match self.policy {
            ScorePolicy::Upsert => self.scores.upsert(&score).await?,
            ScorePolicy::InsertOnly => self.scores.insert(&score).await?,
        }

        info!(
            judge = %judge.email,
            team_numero,
            phase = %phase,
            submitted_by = %caller.id,
            "Score recorded"
        );

        Ok(())
    }
}

/// The judge a submission is recorded for
///
/// Judges always score as themselves. Admins may score on behalf of another
/// judge and otherwise score under their own email.
fn effective_judge_email(caller: &AuthenticatedUser, override_email: Option<&str>) -> String {
    let override_email = override_email.map(normalize_email).filter(|e| !e.is_empty());

    match (caller.role, override_email) {
        (Role::Admin, Some(email)) => email,
        (Role::Judge, Some(email)) if email != caller.email => {
            info!(caller = %caller.email, requested = %email, "Ignoring judge email override from a judge");
            caller.email.clone()
        }
        _ => caller.email.clone(),
    }
}
