//! Team and judge directory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Team database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    /// Public team number used by clients
    pub numero: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Judge directory entry
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Judge {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Team numbers this judge must not score
    pub conflict_team_numbers: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl Judge {
    /// Check whether the judge declared a conflict with the given team
    pub fn has_conflict_with(&self, team_numero: i32) -> bool {
        self.conflict_team_numbers.contains(&team_numero)
    }
}

/// Sort and deduplicate a conflict list so it behaves as a set
pub fn normalize_conflicts(mut numeros: Vec<i32>) -> Vec<i32> {
    numeros.sort_unstable();
    numeros.dedup();
    numeros
}
