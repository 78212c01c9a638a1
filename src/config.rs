//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once in `main` and handed to the application state.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_DELIVERABLES_PATH, DEFAULT_DELIVERABLE_GRACE_MINUTES, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_DELIVERABLE_GRACE_MINUTES, MAX_JWT_EXPIRY_HOURS,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub judging: JudgingConfig,
    pub bootstrap: BootstrapConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Deliverable storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub deliverables_path: PathBuf,
}

/// How a second score for the same (judge, team, phase) is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Overwrite the previous score (last write wins)
    #[default]
    Upsert,
    /// Keep the first score and reject later ones as duplicates
    InsertOnly,
}

impl FromStr for ScorePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(Self::Upsert),
            "insert_only" => Ok(Self::InsertOnly),
            _ => Err(ConfigError::InvalidValue("SCORE_SUBMISSION_POLICY".to_string())),
        }
    }
}

/// Judging rules configuration
#[derive(Debug, Clone)]
pub struct JudgingConfig {
    pub score_policy: ScorePolicy,
    /// Treat a failed phase window lookup as an open window.
    ///
    /// This weakens window enforcement while the database is degraded; set
    /// `PHASE_WINDOW_FAIL_OPEN=false` to reject submissions instead.
    pub window_fail_open: bool,
    /// Minutes after a window closes during which deliverables are still
    /// accepted but flagged late
    pub deliverable_grace_minutes: i64,
}

impl Default for JudgingConfig {
    fn default() -> Self {
        Self {
            score_policy: ScorePolicy::Upsert,
            window_fail_open: true,
            deliverable_grace_minutes: DEFAULT_DELIVERABLE_GRACE_MINUTES,
        }
    }
}

/// Initial administrator, created at startup when absent
#[derive(Debug, Clone, Default)]
pub struct BootstrapConfig {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            judging: JudgingConfig::from_env()?,
            bootstrap: BootstrapConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                Ok("pretty") | Err(_) => LogFormat::Pretty,
                Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            },
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS,
            )?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: within(
                "JWT_EXPIRY_HOURS",
                parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
                1..=MAX_JWT_EXPIRY_HOURS,
            )?,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            deliverables_path: PathBuf::from(
                env::var("DELIVERABLES_PATH").unwrap_or_else(|_| DEFAULT_DELIVERABLES_PATH.to_string()),
            ),
        })
    }
}

impl JudgingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            score_policy: match env::var("SCORE_SUBMISSION_POLICY") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.score_policy,
            },
            window_fail_open: parse_var("PHASE_WINDOW_FAIL_OPEN", defaults.window_fail_open)?,
            deliverable_grace_minutes: within(
                "DELIVERABLE_GRACE_MINUTES",
                parse_var("DELIVERABLE_GRACE_MINUTES", defaults.deliverable_grace_minutes)?,
                0..=MAX_DELIVERABLE_GRACE_MINUTES,
            )?,
        })
    }
}

impl BootstrapConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let admin_email = env::var("BOOTSTRAP_ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("BOOTSTRAP_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

        // Both or neither
        if admin_email.is_some() != admin_password.is_some() {
            return Err(ConfigError::Missing(
                "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together".to_string(),
            ));
        }

        Ok(Self {
            admin_email,
            admin_password,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with defaults and a fixed secret, independent of the environment
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                rust_log: "info".to_string(),
                log_format: LogFormat::Pretty,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/hackjudge_test".to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                acquire_timeout_secs: DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            },
            storage: StorageConfig {
                deliverables_path: PathBuf::from(DEFAULT_DELIVERABLES_PATH),
            },
            judging: JudgingConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Reject values outside `range`
fn within(name: &str, value: i64, range: RangeInclusive<i64>) -> Result<i64, ConfigError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{} (expected {} to {}, got {})",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
