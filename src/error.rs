//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::models::Phase;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    #[error("Invalid deliverable type: {0}")]
    InvalidType(String),

    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrl,

    #[error("File must be a PDF")]
    NotPdf,

    #[error("File exceeds the maximum size of {0} bytes")]
    FileTooLarge(usize),

    #[error("Validation error: {0}")]
    Validation(String),

    // Referential errors
    #[error("Judge not found: {0}")]
    JudgeNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(i32),

    #[error("Not found: {0}")]
    NotFound(String),

    // Business rules
    #[error("Judge has a conflict of interest with team {0}")]
    ConflictOfInterest(i32),

    #[error("Submission window for phase {0} is closed")]
    OutOfWindow(Phase),

    #[error("Participants may only submit for their own team")]
    WrongTeam,

    // State conflicts
    #[error("Already exists: {0}")]
    Duplicate(String),

    // Infrastructure errors
    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
///
/// `error` is the snake_case kind; `detail` carries structured context when
/// the kind has any.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Error kind attached to the response extensions for the request logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind(pub &'static str);

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden(_) => "forbidden",
            Self::MissingFields(_) => "missing_fields",
            Self::InvalidPhase(_) => "invalid_phase",
            Self::InvalidType(_) => "invalid_type",
            Self::InvalidUrl => "invalid_url",
            Self::NotPdf => "not_pdf",
            Self::FileTooLarge(_) => "file_too_large",
            Self::Validation(_) => "validation_error",
            Self::JudgeNotFound(_) => "judge_not_found",
            Self::TeamNotFound(_) => "team_not_found",
            Self::NotFound(_) => "not_found",
            Self::ConflictOfInterest(_) => "conflict_of_interest",
            Self::OutOfWindow(_) => "out_of_window",
            Self::WrongTeam => "wrong_team",
            Self::Duplicate(_) => "duplicate",
            Self::Persistence(_) => "persistence_failure",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_)
            | Self::ConflictOfInterest(_)
            | Self::OutOfWindow(_)
            | Self::WrongTeam => StatusCode::FORBIDDEN,
            Self::MissingFields(_)
            | Self::InvalidPhase(_)
            | Self::InvalidType(_)
            | Self::InvalidUrl
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotPdf => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::JudgeNotFound(_) | Self::TeamNotFound(_) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Structured context attached to the response body
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::OutOfWindow(phase) => Some(json!({ "phase": phase })),
            Self::ConflictOfInterest(numero) | Self::TeamNotFound(numero) => {
                Some(json!({ "team_numero": numero }))
            }
            Self::Persistence(detail) => Some(json!({ "detail": detail })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence failure: {}", e);
                "A database error occurred".to_string()
            }
            AppError::StorageUnavailable(e) => {
                tracing::error!("Storage unavailable: {}", e);
                "Deliverable storage is unavailable".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: self.error_code(),
            message,
            detail: self.details(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorKind(self.error_code()));
        response
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Duplicate("Resource already exists".to_string())
            }
            _ => AppError::Persistence(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::FileTooLarge(crate::constants::MAX_DELIVERABLE_SIZE)
        } else {
            AppError::Validation(format!("Failed to read multipart: {}", err.body_text()))
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        AppError::Validation(err.body_text())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_snake_case_kinds() {
        assert_eq!(AppError::ConflictOfInterest(7).error_code(), "conflict_of_interest");
        assert_eq!(AppError::InvalidPhase("demo".into()).error_code(), "invalid_phase");
        assert_eq!(AppError::WrongTeam.error_code(), "wrong_team");
        assert_eq!(AppError::OutOfWindow(Phase::Pitch).error_code(), "out_of_window");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::TeamNotFound(4).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Duplicate("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotPdf.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            AppError::FileTooLarge(1).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_out_of_window_carries_phase() {
        let details = AppError::OutOfWindow(Phase::Mvp).details().unwrap();
        assert_eq!(details["phase"], "mvp");
    }

    #[tokio::test]
    async fn test_body_carries_kind_at_top_level() {
        let response = AppError::OutOfWindow(Phase::Canvas).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind("out_of_window"))
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "out_of_window");
        assert_eq!(body["detail"]["phase"], "canvas");
        assert!(body["message"].is_string());

        let response = AppError::MissingFields("password".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "missing_fields");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn test_row_not_found_is_persistence_failure() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.error_code(), "persistence_failure");
    }
}
