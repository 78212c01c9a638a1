//! Authentication request DTOs

use serde::Deserialize;

/// Login request
///
/// Fields are optional so that absent ones are reported as `missing_fields`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
