//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Role, User};

/// User summary returned by login, `/me` and account creation
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub team_id: Option<Uuid>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            team_id: user.team_id,
            name: user.name,
            is_active: user.is_active,
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Current user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub ok: bool,
    pub user: UserResponse,
}
