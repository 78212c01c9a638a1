//! Admin service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{Directory, PhaseWindowStore, UserStore},
    error::{AppError, AppResult},
    models::{Judge, NewUser, Phase, PhaseWindow, Role, Team, User, normalize_email},
};

use super::auth_service::hash_password;

/// Input for creating a user account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: Role,
    pub team_numero: Option<i32>,
}

/// Admin service for event reference data
#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UserStore>,
    directory: Arc<dyn Directory>,
    windows: Arc<dyn PhaseWindowStore>,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        directory: Arc<dyn Directory>,
        windows: Arc<dyn PhaseWindowStore>,
    ) -> Self {
        Self {
            users,
            directory,
            windows,
        }
    }

    /// Create a user; judge accounts get a directory entry in the same write
    pub async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let email = normalize_email(&input.email);

        let team_id = match (input.role, input.team_numero) {
            (Role::Participant, None) => {
                return Err(AppError::Validation("Participants must belong to a team".to_string()));
            }
            (_, Some(numero)) => Some(
                self.directory
                    .resolve_team(numero)
                    .await?
                    .ok_or(AppError::TeamNotFound(numero))?
                    .id,
            ),
            (_, None) => None,
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Duplicate(format!("User {} already exists", email)));
        }

        let user = self
            .users
            .create(&NewUser {
                email,
                name: input.name.filter(|n| !n.trim().is_empty()),
                password_hash: hash_password(&input.password)?,
                role: input.role,
                team_id,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");
        Ok(user)
    }

    /// Deactivate a user; accounts are never deleted
    pub async fn deactivate_user(&self, id: Uuid) -> AppResult<()> {
        if !self.users.deactivate(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        info!(user_id = %id, "User deactivated");
        Ok(())
    }

    /// Register a team
    pub async fn create_team(&self, numero: i32, name: &str) -> AppResult<Team> {
        if numero <= 0 {
            return Err(AppError::Validation("Team number must be positive".to_string()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingFields("name".to_string()));
        }

        let team = self.directory.create_team(numero, name).await?;
        info!(team_numero = team.numero, name = %team.name, "Team created");
        Ok(team)
    }

    /// Replace a judge's conflict set
    pub async fn set_judge_conflicts(&self, email: &str, numeros: Vec<i32>) -> AppResult<Judge> {
        let email = normalize_email(email);

        let judge = self
            .directory
            .set_judge_conflicts(&email, numeros)
            .await?
            .ok_or_else(|| AppError::JudgeNotFound(email.clone()))?;

        info!(judge = %judge.email, conflicts = ?judge.conflict_team_numbers, "Judge conflicts updated");
        Ok(judge)
    }

    /// Configure the submission window of a phase
    pub async fn set_phase_window(
        &self,
        phase: Phase,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> AppResult<PhaseWindow> {
        if starts_at >= ends_at {
            return Err(AppError::Validation("Window start must be before its end".to_string()));
        }

        let window = PhaseWindow {
            phase,
            starts_at,
            ends_at,
        };
        self.windows.set_window(&window).await?;

        info!(phase = %phase, starts_at = %starts_at, ends_at = %ends_at, "Phase window set");
        Ok(window)
    }

    /// Remove the window of a phase, leaving it always open
    pub async fn clear_phase_window(&self, phase: Phase) -> AppResult<()> {
        if !self.windows.clear_window(phase).await? {
            return Err(AppError::NotFound(format!("No window configured for phase {}", phase)));
        }
        info!(phase = %phase, "Phase window cleared");
        Ok(())
    }

    /// Create the initial administrator if no account uses that email yet
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            debug!(email = %email, "Bootstrap admin already present");
            return Ok(None);
        }

        let user = self
            .create_user(CreateUser {
                email,
                password: password.to_string(),
                name: Some("Administrator".to_string()),
                role: Role::Admin,
                team_numero: None,
            })
            .await?;

        Ok(Some(user))
    }
}
