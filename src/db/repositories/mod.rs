//! Database repositories
//!
//! Postgres implementations of the store traits.

pub mod deliverable_repo;
pub mod directory_repo;
pub mod phase_window_repo;
pub mod ranking_repo;
pub mod score_repo;
pub mod user_repo;

pub use deliverable_repo::DeliverableRepository;
pub use directory_repo::DirectoryRepository;
pub use phase_window_repo::PhaseWindowRepository;
pub use ranking_repo::RankingRepository;
pub use score_repo::ScoreRepository;
pub use user_repo::UserRepository;
