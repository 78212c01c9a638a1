//! Deliverable intake

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    constants::{MAX_DELIVERABLE_SIZE, PDF_CONTENT_TYPE},
    db::{DeliverableStore, Directory},
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    models::{Deliverable, DeliverableType, NewDeliverable, Role, Team},
    storage::{BlobStore, deliverable_key},
};

use super::phase_gate::PhaseWindowGate;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("URL pattern is valid"));

/// An uploaded deliverable file
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub team_numero: i32,
    pub deliverable_type: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Deliverable service
#[derive(Clone)]
pub struct DeliverableService {
    directory: Arc<dyn Directory>,
    deliverables: Arc<dyn DeliverableStore>,
    blobs: Arc<dyn BlobStore>,
    gate: PhaseWindowGate,
}

impl DeliverableService {
    pub fn new(
        directory: Arc<dyn Directory>,
        deliverables: Arc<dyn DeliverableStore>,
        blobs: Arc<dyn BlobStore>,
        gate: PhaseWindowGate,
    ) -> Self {
        Self {
            directory,
            deliverables,
            blobs,
            gate,
        }
    }

    /// Accept a PDF deliverable
    ///
    /// Content type and size are checked before anything else is looked up.
    pub async fn submit_file(&self, caller: &AuthenticatedUser, upload: FileUpload) -> AppResult<Deliverable> {
        ensure_can_submit(caller)?;

        if upload.content_type.as_deref() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::NotPdf);
        }
        if upload.bytes.len() > MAX_DELIVERABLE_SIZE {
            return Err(AppError::FileTooLarge(MAX_DELIVERABLE_SIZE));
        }

        let kind = DeliverableType::parse(&upload.deliverable_type)
            .ok_or_else(|| AppError::InvalidType(upload.deliverable_type.clone()))?;
        if kind.is_link() {
            return Err(AppError::InvalidType(format!("{} must be submitted as a link", kind)));
        }

        let intake = self.admit(caller, upload.team_numero, kind).await?;
        let previous = self.current_value(intake.team.id, kind).await?;

        let key = deliverable_key(intake.team.numero, kind, &upload.bytes);
        let location = self.blobs.put(&key, &upload.bytes).await?;

        let deliverable = self.record(caller, intake, kind, location).await?;

        // Identical content maps to the same blob, which is still referenced
        if let Some(previous) = previous.filter(|p| *p != deliverable.value) {
            self.discard_blob(&previous).await;
        }

        Ok(deliverable)
    }

    /// Accept the MVP link deliverable
    pub async fn submit_link(&self, caller: &AuthenticatedUser, team_numero: i32, url: &str) -> AppResult<Deliverable> {
        ensure_can_submit(caller)?;

        // Lowercase scheme only, no surrounding whitespace
        if !URL_PATTERN.is_match(url) {
            return Err(AppError::InvalidUrl);
        }

        let kind = DeliverableType::MvpLink;
        let intake = self.admit(caller, team_numero, kind).await?;

        self.record(caller, intake, kind, url.to_string()).await
    }

    /// Current deliverables of a team; participants only see their own
    pub async fn list_for_team(&self, caller: &AuthenticatedUser, team_numero: i32) -> AppResult<Vec<Deliverable>> {
        let team = self.resolve_team(team_numero).await?;

        if caller.role == Role::Participant && caller.team_id != Some(team.id) {
            return Err(AppError::WrongTeam);
        }

        self.deliverables.list_for_team(team.id).await
    }

    /// Window, team and ownership checks shared by both intake paths
    async fn admit(&self, caller: &AuthenticatedUser, team_numero: i32, kind: DeliverableType) -> AppResult<Intake> {
        let submitted_at = Utc::now();
        let phase = kind.phase();

        let status = self.gate.evaluate(phase, submitted_at).await?;
        if !status.accepts() {
            return Err(AppError::OutOfWindow(phase));
        }

        let team = self.resolve_team(team_numero).await?;

        // Admins may submit for any team
        if caller.role == Role::Participant && caller.team_id != Some(team.id) {
            warn!(user_id = %caller.id, team_numero, "Deliverable rejected: wrong team");
            return Err(AppError::WrongTeam);
        }

        Ok(Intake {
            team,
            submitted_at,
            is_late: status.is_late(),
        })
    }

    async fn record(
        &self,
        caller: &AuthenticatedUser,
        intake: Intake,
        kind: DeliverableType,
        value: String,
    ) -> AppResult<Deliverable> {
        let deliverable = self
            .deliverables
            .upsert(&NewDeliverable {
                team_id: intake.team.id,
                deliverable_type: kind,
                value,
                submitted_at: intake.submitted_at,
                is_late: intake.is_late,
                submitted_by: caller.id,
            })
            .await?;

        info!(
            team_numero = intake.team.numero,
            deliverable_type = %kind,
            is_late = deliverable.is_late,
            submitted_by = %caller.id,
            "Deliverable recorded"
        );

        Ok(deliverable)
    }

    async fn current_value(&self, team_id: Uuid, kind: DeliverableType) -> AppResult<Option<String>> {
        Ok(self
            .deliverables
            .list_for_team(team_id)
            .await?
            .into_iter()
            .find(|d| d.deliverable_type == kind)
            .map(|d| d.value))
    }

    /// Best effort: the record already points at the new blob
    async fn discard_blob(&self, location: &str) {
        if let Err(e) = self.blobs.delete(location).await {
            warn!(location, error = %e, "Failed to remove replaced deliverable file");
        }
    }

    async fn resolve_team(&self, numero: i32) -> AppResult<Team> {
        self.directory
            .resolve_team(numero)
            .await?
            .ok_or(AppError::TeamNotFound(numero))
    }
}

/// Outcome of the admission checks
struct Intake {
    team: Team,
    submitted_at: chrono::DateTime<Utc>,
    is_late: bool,
}

fn ensure_can_submit(caller: &AuthenticatedUser) -> AppResult<()> {
    if caller.role.can_submit_deliverables() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Judges cannot submit deliverables".to_string()))
    }
}
