//! Store interfaces consumed by the services
//!
//! Every backing store is reached through one of these traits so services can
//! be built from injected handles. Postgres implementations live in
//! [`crate::db::repositories`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Deliverable, Judge, NewDeliverable, NewScore, NewUser, Phase, PhaseWindow, Team,
        TeamStanding, User,
    },
};

/// User accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find an active user by (lowercased) email
    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by (lowercased) email regardless of the active flag
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Create a user; a judge-role user also gets a judge entry if none exists,
    /// in the same transaction
    async fn create(&self, user: &NewUser) -> AppResult<User>;

    /// Clear the active flag; returns false if the user does not exist
    async fn deactivate(&self, id: Uuid) -> AppResult<bool>;
}

/// Team and judge directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Directory: Send + Sync {
    /// Exact lookup by public team number
    async fn resolve_team(&self, numero: i32) -> AppResult<Option<Team>>;

    /// Lookup by (lowercased) judge email
    async fn resolve_judge(&self, email: &str) -> AppResult<Option<Judge>>;

    /// Register a team
    async fn create_team(&self, numero: i32, name: &str) -> AppResult<Team>;

    /// Replace a judge's conflict set; returns None if the judge does not exist
    async fn set_judge_conflicts(&self, email: &str, numeros: Vec<i32>) -> AppResult<Option<Judge>>;
}

/// Configured phase windows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhaseWindowStore: Send + Sync {
    /// The window for a phase, if one is configured
    async fn window_for(&self, phase: Phase) -> AppResult<Option<PhaseWindow>>;

    /// Create or replace a phase window
    async fn set_window(&self, window: &PhaseWindow) -> AppResult<()>;

    /// Remove a phase window; returns false if none was configured
    async fn clear_window(&self, phase: Phase) -> AppResult<bool>;
}

/// Judge scores, unique per (judge, team, phase)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Insert the score or overwrite the existing one for the same triple
    async fn upsert(&self, score: &NewScore) -> AppResult<()>;

    /// Insert the score; fails with `Duplicate` if the triple already has one
    async fn insert(&self, score: &NewScore) -> AppResult<()>;
}

/// Team deliverables, unique per (team, type)
#[async_trait]
pub trait DeliverableStore: Send + Sync {
    /// Insert the deliverable or overwrite the existing one for the same type
    async fn upsert(&self, deliverable: &NewDeliverable) -> AppResult<Deliverable>;

    /// Current deliverables of a team
    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Deliverable>>;
}

/// Read-only ranking projection
#[async_trait]
pub trait RankingView: Send + Sync {
    /// Team standings, best first
    async fn standings(&self) -> AppResult<Vec<TeamStanding>>;
}

/// Reachability of the backing store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// One round trip to the store
    async fn ping(&self) -> AppResult<()>;
}
