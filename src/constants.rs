//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a pooled connection, in seconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 12;

/// Upper bound for `JWT_EXPIRY_HOURS` (30 days)
pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 30;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// SCORING
// =============================================================================

/// Inclusive score ranges per field
pub mod score_ranges {
    /// Canvas phase: single score
    pub const CANVAS: (i32, i32) = (0, 20);

    /// MVP phase: single score
    pub const MVP: (i32, i32) = (0, 30);

    /// Pitch phase: each of the five criteria
    pub const PITCH_CRITERION: (i32, i32) = (0, 100);
}

/// Maximum length of a judge's free-text note
pub const MAX_NOTES_LENGTH: u64 = 4000;

// =============================================================================
// DELIVERABLES
// =============================================================================

/// Hard ceiling for uploaded deliverable files (20 MiB)
pub const MAX_DELIVERABLE_SIZE: usize = 20 * 1024 * 1024;

/// Request body cap for the upload route (file ceiling plus multipart framing)
pub const MAX_UPLOAD_BODY_SIZE: usize = MAX_DELIVERABLE_SIZE + 64 * 1024;

/// The only content type accepted for binary deliverables
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Default deliverables storage directory
pub const DEFAULT_DELIVERABLES_PATH: &str = "/data/deliverables";

/// Default grace period after a phase window closes, in minutes
pub const DEFAULT_DELIVERABLE_GRACE_MINUTES: i64 = 0;

/// Upper bound for `DELIVERABLE_GRACE_MINUTES` (one day)
pub const MAX_DELIVERABLE_GRACE_MINUTES: i64 = 24 * 60;

/// Number of hex characters of the content hash kept in blob keys
pub const BLOB_HASH_PREFIX_LEN: usize = 16;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
