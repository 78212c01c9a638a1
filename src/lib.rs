//! HackJudge - Hackathon Judging Backend
//!
//! This library provides the core functionality for running the judging of a
//! hackathon: judges score teams across staged phases, teams hand in their
//! deliverables, and a ranking is computed from the recorded scores.
//!
//! # Features
//!
//! - Role-based access for admins, judges and participants
//! - Phase windows gating deliverable intake
//! - Conflict-of-interest checks and per-phase score normalization
//! - Idempotent score and deliverable writes
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Stores**: Trait seams over persistence, implemented by repositories
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
