//! Application state management
//!
//! The shared state passed to all request handlers via Axum's State
//! extractor. Every collaborator is built once at startup and injected here.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        DeliverableStore, Directory, PhaseWindowStore, PoolHealth, RankingView, ScoreStore,
        StoreHealth, UserStore,
        repositories::{
            DeliverableRepository, DirectoryRepository, PhaseWindowRepository, RankingRepository,
            ScoreRepository, UserRepository,
        },
    },
    services::{
        AdminService, AuthService, CredentialVerifier, DeliverableService, JwtCredentials,
        PhaseWindowGate, ScoringService,
    },
    storage::{BlobStore, LocalBlobStore},
};

/// Backing collaborators the services are built from
#[derive(Clone)]
pub struct Collaborators {
    pub users: Arc<dyn UserStore>,
    pub directory: Arc<dyn Directory>,
    pub windows: Arc<dyn PhaseWindowStore>,
    pub scores: Arc<dyn ScoreStore>,
    pub deliverables: Arc<dyn DeliverableStore>,
    pub ranking: Arc<dyn RankingView>,
    pub blobs: Arc<dyn BlobStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub health: Arc<dyn StoreHealth>,
}

impl Collaborators {
    /// Production wiring: Postgres stores, filesystem blobs, JWT credentials
    pub fn production(pool: PgPool, config: &Config) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            directory: Arc::new(DirectoryRepository::new(pool.clone())),
            windows: Arc::new(PhaseWindowRepository::new(pool.clone())),
            scores: Arc::new(ScoreRepository::new(pool.clone())),
            deliverables: Arc::new(DeliverableRepository::new(pool.clone())),
            ranking: Arc::new(RankingRepository::new(pool.clone())),
            health: Arc::new(PoolHealth::new(pool)),
            blobs: Arc::new(LocalBlobStore::new(&config.storage.deliverables_path)),
            credentials: Arc::new(JwtCredentials::from_config(&config.jwt)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    config: Config,
    credentials: Arc<dyn CredentialVerifier>,
    ranking: Arc<dyn RankingView>,
    health: Arc<dyn StoreHealth>,
    gate: PhaseWindowGate,
    auth: AuthService,
    scoring: ScoringService,
    deliverables: DeliverableService,
    admin: AdminService,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, c: Collaborators) -> Self {
        let judging = &config.judging;
        let gate = PhaseWindowGate::new(
            c.windows.clone(),
            judging.window_fail_open,
            judging.deliverable_grace_minutes,
        );

        let inner = AppStateInner {
            auth: AuthService::new(c.users.clone(), c.credentials.clone()),
            scoring: ScoringService::new(c.directory.clone(), c.scores, judging.score_policy),
            deliverables: DeliverableService::new(
                c.directory.clone(),
                c.deliverables,
                c.blobs,
                gate.clone(),
            ),
            admin: AdminService::new(c.users, c.directory, c.windows),
            credentials: c.credentials,
            ranking: c.ranking,
            health: c.health,
            gate,
            config,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn credentials(&self) -> &dyn CredentialVerifier {
        self.inner.credentials.as_ref()
    }

    pub fn ranking(&self) -> &dyn RankingView {
        self.inner.ranking.as_ref()
    }

    pub fn store_health(&self) -> &dyn StoreHealth {
        self.inner.health.as_ref()
    }

    pub fn phase_gate(&self) -> &PhaseWindowGate {
        &self.inner.gate
    }

    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    pub fn scoring(&self) -> &ScoringService {
        &self.inner.scoring
    }

    pub fn deliverables(&self) -> &DeliverableService {
        &self.inner.deliverables
    }

    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }
}
