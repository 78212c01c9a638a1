//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod deliverable;
pub mod phase;
pub mod ranking;
pub mod score;
pub mod team;
pub mod user;

pub use deliverable::*;
pub use phase::*;
pub use ranking::*;
pub use score::*;
pub use team::*;
pub use user::*;
