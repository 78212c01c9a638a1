//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The three fixed roles of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Judge,
    Participant,
}

impl Role {
    /// Get role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Judge => "judge",
            Self::Participant => "participant",
        }
    }

    /// Whether this role may record scores
    pub fn can_score(&self) -> bool {
        match self {
            Self::Admin | Self::Judge => true,
            Self::Participant => false,
        }
    }

    /// Whether this role may hand in deliverables
    pub fn can_submit_deliverables(&self) -> bool {
        match self {
            Self::Admin | Self::Participant => true,
            Self::Judge => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub team_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Already lowercased
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub team_id: Option<Uuid>,
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
