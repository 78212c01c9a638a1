//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{error::AppError, models::Role, state::AppState};

/// Caller identity resolved from a bearer credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub team_id: Option<Uuid>,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

/// Authentication middleware
///
/// Resolves the bearer credential into an [`AuthenticatedUser`] stored in the
/// request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: no Authorization header");
        return Err(AppError::Unauthenticated);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
        return Err(AppError::Unauthenticated);
    };

    let user = state.credentials().verify(token).inspect_err(|e| {
        debug!(path = %path, error = %e, "Auth failed: token verification failed");
    })?;

    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user.clone());

    // Exposed to the request logger, which runs outside this layer
    let mut response = next.run(request).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Admin gate for routes mounted behind [`auth_middleware`]
pub async fn require_admin(
    user: AuthenticatedUser,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&user, &[Role::Admin])?;
    Ok(next.run(request).await)
}

/// Fail with `Forbidden` unless the caller holds one of `allowed`
pub fn require_role(user: &AuthenticatedUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Insufficient permissions".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            team_id: None,
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&user(Role::Judge), &[Role::Judge, Role::Admin]).is_ok());
        assert!(require_role(&user(Role::Admin), &[Role::Admin]).is_ok());

        let err = require_role(&user(Role::Participant), &[Role::Judge, Role::Admin]).unwrap_err();
        assert_eq!(err.error_code(), "forbidden");
    }
}
