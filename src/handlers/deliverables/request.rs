//! Deliverable request DTOs

use serde::Deserialize;

/// Multipart field names of the upload form
pub mod fields {
    pub const TEAM_NUMERO: &str = "teamNumero";
    pub const TYPE: &str = "type";
    pub const FILE: &str = "file";
}

/// MVP link submission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLinkRequest {
    pub team_numero: Option<i32>,
    pub url: Option<String>,
}
