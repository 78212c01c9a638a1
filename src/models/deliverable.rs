//! Deliverable model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Phase;

/// Kind of deliverable a team hands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "deliverable_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliverableType {
    CanvasPdf,
    MvpOnepagerPdf,
    MvpLink,
    PitchPdf,
}

impl DeliverableType {
    /// Get type as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CanvasPdf => "canvas_pdf",
            Self::MvpOnepagerPdf => "mvp_onepager_pdf",
            Self::MvpLink => "mvp_link",
            Self::PitchPdf => "pitch_pdf",
        }
    }

    /// Parse type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "canvas_pdf" => Some(Self::CanvasPdf),
            "mvp_onepager_pdf" => Some(Self::MvpOnepagerPdf),
            "mvp_link" => Some(Self::MvpLink),
            "pitch_pdf" => Some(Self::PitchPdf),
            _ => None,
        }
    }

    /// The phase this deliverable belongs to
    pub fn phase(&self) -> Phase {
        match self {
            Self::CanvasPdf => Phase::Canvas,
            Self::MvpOnepagerPdf | Self::MvpLink => Phase::Mvp,
            Self::PitchPdf => Phase::Pitch,
        }
    }

    /// Whether the deliverable is a URL rather than an uploaded file
    pub fn is_link(&self) -> bool {
        matches!(self, Self::MvpLink)
    }
}

impl std::fmt::Display for DeliverableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deliverable database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: Uuid,
    pub team_id: Uuid,
    pub deliverable_type: DeliverableType,
    /// Blob path for files, URL for links
    pub value: String,
    pub submitted_at: DateTime<Utc>,
    pub is_late: bool,
    pub submitted_by: Uuid,
}

/// A validated deliverable ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeliverable {
    pub team_id: Uuid,
    pub deliverable_type: DeliverableType,
    pub value: String,
    pub submitted_at: DateTime<Utc>,
    pub is_late: bool,
    pub submitted_by: Uuid,
}
