//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod credentials;
pub mod deliverable_service;
pub mod phase_gate;
pub mod scoring_service;

pub use admin_service::{AdminService, CreateUser};
pub use auth_service::AuthService;
pub use credentials::{CredentialVerifier, JwtCredentials};
pub use deliverable_service::{DeliverableService, FileUpload};
pub use phase_gate::PhaseWindowGate;
pub use scoring_service::{ScoreSubmission, ScoringService};
