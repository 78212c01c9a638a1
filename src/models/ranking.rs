//! Ranking projection model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the ranking view
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamStanding {
    pub position: i64,
    pub numero: i32,
    pub name: String,
    pub canvas_avg: Option<f64>,
    pub mvp_avg: Option<f64>,
    pub pitch_avg: Option<f64>,
    pub total: f64,
    pub scores_count: i64,
}
