//! Authentication service

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{User, normalize_email},
};

use super::credentials::{CredentialVerifier, IssuedToken};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self { users, credentials }
    }

    /// Login with email and password
    ///
    /// Unknown, inactive and wrong-password accounts all fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, IssuedToken)> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_active_by_email(&email).await? else {
            debug!(email = %email, "Login failed: no active user");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(email = %email, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.credentials.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok((user, token))
    }

    /// Get the stored record behind an identity
    pub async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

/// Hash password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verify password against hash
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore,
        models::{NewUser, Role},
        services::credentials::JwtCredentials,
    };

    async fn service_with_user(email: &str, password: &str) -> (AuthService, Arc<MemoryStore>, User) {
        let store = Arc::new(MemoryStore::new());
        let user = store
            .create(&NewUser {
                email: email.to_string(),
                name: Some("Ada".to_string()),
                password_hash: hash_password(password).unwrap(),
                role: Role::Judge,
                team_id: None,
            })
            .await
            .unwrap();

        let service = AuthService::new(store.clone(), Arc::new(JwtCredentials::new("secret", 12)));
        (service, store, user)
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive_on_email() {
        let (service, _, user) = service_with_user("ada@example.com", "correct horse").await;

        let (logged_in, token) = service.login("  Ada@Example.COM ", "correct horse").await.unwrap();

        assert_eq!(logged_in.id, user.id);
        assert!(!token.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let (service, _, _) = service_with_user("ada@example.com", "correct horse").await;

        let err = service.login("ada@example.com", "battery staple").await.unwrap_err();
        assert_eq!(err.error_code(), "invalid_credentials");
    }

    #[tokio::test]
    async fn test_login_rejects_deactivated_user() {
        let (service, store, user) = service_with_user("ada@example.com", "correct horse").await;
        store.deactivate(user.id).await.unwrap();

        let err = service.login("ada@example.com", "correct horse").await.unwrap_err();
        assert_eq!(err.error_code(), "invalid_credentials");
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("other-pass", &hash).unwrap());
    }
}
