//! Credential issuance and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    constants::MAX_JWT_EXPIRY_HOURS,
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    models::{Role, User},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: Role,
    pub team_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly issued credential
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Issues and verifies the bearer credentials used by every protected route
pub trait CredentialVerifier: Send + Sync {
    /// Issue a time-limited credential for `user`
    fn issue(&self, user: &User) -> AppResult<IssuedToken>;

    /// Resolve a credential into the caller's identity
    fn verify(&self, token: &str) -> AppResult<AuthenticatedUser>;
}

/// HMAC-signed JWT credentials
pub struct JwtCredentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl JwtCredentials {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            // Negative lifetimes issue already-expired tokens
            expiry_hours: expiry_hours.clamp(-MAX_JWT_EXPIRY_HOURS, MAX_JWT_EXPIRY_HOURS),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, config.expiry_hours)
    }
}

impl CredentialVerifier for JwtCredentials {
    fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            team_id: user.team_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.expiry_hours * 3600,
        })
    }

    fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())?.claims;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        Ok(AuthenticatedUser {
            id,
            email: claims.email,
            role: claims.role,
            team_id: claims.team_id,
        })
    }
}
