//! In-memory store used by tests
//!
//! Implements every store trait over one mutex-guarded state, so each write
//! is atomic in the same way a single SQL statement is.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::store::{
        DeliverableStore, Directory, PhaseWindowStore, RankingView, ScoreStore, StoreHealth,
        UserStore,
    },
    error::{AppError, AppResult},
    models::{
        Deliverable, DeliverableType, Judge, NewDeliverable, NewScore, NewUser, Phase, PhaseWindow,
        Role, Score, Team, TeamStanding, User, normalize_conflicts,
    },
    storage::BlobStore,
};

#[derive(Default)]
struct State {
    users: Vec<User>,
    teams: Vec<Team>,
    judges: Vec<Judge>,
    windows: HashMap<Phase, PhaseWindow>,
    scores: HashMap<(Uuid, Uuid, Phase), Score>,
    deliverables: HashMap<(Uuid, DeliverableType), Deliverable>,
    blobs: HashMap<String, Vec<u8>>,
}

/// In-memory implementation of all stores
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team directly
    pub fn seed_team(&self, numero: i32, name: &str) -> Team {
        let team = Team {
            id: Uuid::new_v4(),
            numero,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().teams.push(team.clone());
        team
    }

    /// Add a judge entry directly
    pub fn seed_judge(&self, email: &str, conflicts: &[i32]) -> Judge {
        let judge = Judge {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: None,
            conflict_team_numbers: conflicts.to_vec(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().judges.push(judge.clone());
        judge
    }

    /// All stored score rows
    pub fn score_rows(&self) -> Vec<Score> {
        self.state.lock().unwrap().scores.values().cloned().collect()
    }

    /// All stored deliverable rows
    pub fn deliverable_rows(&self) -> Vec<Deliverable> {
        self.state.lock().unwrap().deliverables.values().cloned().collect()
    }

    /// All judge entries
    pub fn judge_rows(&self) -> Vec<Judge> {
        self.state.lock().unwrap().judges.clone()
    }

    /// Content of a stored blob
    pub fn blob(&self, location: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().blobs.get(location).cloned()
    }

    fn score_row(score: &NewScore, id: Uuid) -> Score {
        let now = Utc::now();
        let f = &score.fields;
        Score {
            id,
            judge_id: score.judge_id,
            team_id: score.team_id,
            phase: score.phase,
            canvas_score: f.canvas_score,
            mvp_score: f.mvp_score,
            impact: f.impact,
            business_model: f.business_model,
            innovation: f.innovation,
            viability: f.viability,
            extra_criterion: f.extra_criterion,
            notes: score.notes.clone(),
            submitted_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email && u.is_active).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Duplicate("Resource already exists".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            team_id: user.team_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        if created.role == Role::Judge && !state.judges.iter().any(|j| j.email == created.email) {
            state.judges.push(Judge {
                id: Uuid::new_v4(),
                email: created.email.clone(),
                name: created.name.clone(),
                conflict_team_numbers: Vec::new(),
                created_at: now,
            });
        }

        state.users.push(created.clone());
        Ok(created)
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_active = false;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn resolve_team(&self, numero: i32) -> AppResult<Option<Team>> {
        let state = self.state.lock().unwrap();
        Ok(state.teams.iter().find(|t| t.numero == numero).cloned())
    }

    async fn resolve_judge(&self, email: &str) -> AppResult<Option<Judge>> {
        let state = self.state.lock().unwrap();
        Ok(state.judges.iter().find(|j| j.email == email).cloned())
    }

    async fn create_team(&self, numero: i32, name: &str) -> AppResult<Team> {
        if self.resolve_team(numero).await?.is_some() {
            return Err(AppError::Duplicate("Resource already exists".to_string()));
        }
        Ok(self.seed_team(numero, name))
    }

    async fn set_judge_conflicts(&self, email: &str, numeros: Vec<i32>) -> AppResult<Option<Judge>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.judges.iter_mut().find(|j| j.email == email).map(|judge| {
            judge.conflict_team_numbers = normalize_conflicts(numeros);
            judge.clone()
        }))
    }
}

#[async_trait]
impl PhaseWindowStore for MemoryStore {
    async fn window_for(&self, phase: Phase) -> AppResult<Option<PhaseWindow>> {
        Ok(self.state.lock().unwrap().windows.get(&phase).cloned())
    }

    async fn set_window(&self, window: &PhaseWindow) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .windows
            .insert(window.phase, window.clone());
        Ok(())
    }

    async fn clear_window(&self, phase: Phase) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().windows.remove(&phase).is_some())
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn upsert(&self, score: &NewScore) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let key = (score.judge_id, score.team_id, score.phase);
        let id = state.scores.get(&key).map(|s| s.id).unwrap_or_else(Uuid::new_v4);
        state.scores.insert(key, Self::score_row(score, id));
        Ok(())
    }

    async fn insert(&self, score: &NewScore) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let key = (score.judge_id, score.team_id, score.phase);
        if state.scores.contains_key(&key) {
            return Err(AppError::Duplicate(format!(
                "Score already submitted for phase {}",
                score.phase
            )));
        }
        state.scores.insert(key, Self::score_row(score, Uuid::new_v4()));
        Ok(())
    }
}

#[async_trait]
impl DeliverableStore for MemoryStore {
    async fn upsert(&self, deliverable: &NewDeliverable) -> AppResult<Deliverable> {
        let mut state = self.state.lock().unwrap();
        let key = (deliverable.team_id, deliverable.deliverable_type);
        let id = state
            .deliverables
            .get(&key)
            .map(|d| d.id)
            .unwrap_or_else(Uuid::new_v4);

        let row = Deliverable {
            id,
            team_id: deliverable.team_id,
            deliverable_type: deliverable.deliverable_type,
            value: deliverable.value.clone(),
            submitted_at: deliverable.submitted_at,
            is_late: deliverable.is_late,
            submitted_by: deliverable.submitted_by,
        };
        state.deliverables.insert(key, row.clone());
        Ok(row)
    }

    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Deliverable>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .deliverables
            .values()
            .filter(|d| d.team_id == team_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RankingView for MemoryStore {
    /// Same projection as the `ranking` view: per-phase averages across judges
    async fn standings(&self) -> AppResult<Vec<TeamStanding>> {
        fn average(values: impl Iterator<Item = i32>) -> Option<f64> {
            let values: Vec<i32> = values.collect();
            (!values.is_empty()).then(|| values.iter().sum::<i32>() as f64 / values.len() as f64)
        }

        let state = self.state.lock().unwrap();
        let mut rows: Vec<TeamStanding> = state
            .teams
            .iter()
            .map(|team| {
                let scores: Vec<&Score> =
                    state.scores.values().filter(|s| s.team_id == team.id).collect();

                let canvas_avg = average(scores.iter().filter_map(|s| s.canvas_score));
                let mvp_avg = average(scores.iter().filter_map(|s| s.mvp_score));
                let pitch_avg = average(scores.iter().filter(|s| s.phase == Phase::Pitch).map(|s| {
                    [s.impact, s.business_model, s.innovation, s.viability, s.extra_criterion]
                        .into_iter()
                        .flatten()
                        .sum()
                }));

                TeamStanding {
                    position: 0,
                    numero: team.numero,
                    name: team.name.clone(),
                    canvas_avg,
                    mvp_avg,
                    pitch_avg,
                    total: [canvas_avg, mvp_avg, pitch_avg].into_iter().flatten().sum(),
                    scores_count: scores.len() as i64,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.numero.cmp(&b.numero)));
        for i in 0..rows.len() {
            // Ties share a position, as with RANK()
            rows[i].position = if i > 0 && rows[i].total == rows[i - 1].total {
                rows[i - 1].position
            } else {
                i as i64 + 1
            };
        }
        Ok(rows)
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> AppResult<String> {
        let location = format!("memory://{}", key);
        self.state
            .lock()
            .unwrap()
            .blobs
            .insert(location.clone(), bytes.to_vec());
        Ok(location)
    }

    async fn delete(&self, location: &str) -> AppResult<()> {
        self.state.lock().unwrap().blobs.remove(location);
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
