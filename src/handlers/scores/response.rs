//! Score response DTOs

use serde::Serialize;

/// Acknowledgement of a recorded score
#[derive(Debug, Serialize)]
pub struct SubmitScoreResponse {
    pub ok: bool,
}
