//! Score repository
//!
//! Both write paths are a single statement against the
//! `UNIQUE (judge_id, team_id, phase)` constraint, so concurrent submissions
//! for the same triple can never produce two rows.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::ScoreStore,
    error::{AppError, AppResult},
    models::NewScore,
};

/// Repository for score database operations
#[derive(Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for ScoreRepository {
    async fn upsert(&self, score: &NewScore) -> AppResult<()> {
        let f = &score.fields;

        sqlx::query(
            r#"
            INSERT INTO scores (
                judge_id, team_id, phase,
                canvas_score, mvp_score,
                impact, business_model, innovation, viability, extra_criterion,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (judge_id, team_id, phase) DO UPDATE
            SET canvas_score = EXCLUDED.canvas_score,
                mvp_score = EXCLUDED.mvp_score,
                impact = EXCLUDED.impact,
                business_model = EXCLUDED.business_model,
                innovation = EXCLUDED.innovation,
                viability = EXCLUDED.viability,
                extra_criterion = EXCLUDED.extra_criterion,
                notes = EXCLUDED.notes,
                updated_at = NOW()
            "#,
        )
        .bind(score.judge_id)
        .bind(score.team_id)
        .bind(score.phase)
        .bind(f.canvas_score)
        .bind(f.mvp_score)
        .bind(f.impact)
        .bind(f.business_model)
        .bind(f.innovation)
        .bind(f.viability)
        .bind(f.extra_criterion)
        .bind(&score.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, score: &NewScore) -> AppResult<()> {
        let f = &score.fields;

        let result = sqlx::query(
            r#"
            INSERT INTO scores (
                judge_id, team_id, phase,
                canvas_score, mvp_score,
                impact, business_model, innovation, viability, extra_criterion,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (judge_id, team_id, phase) DO NOTHING
            "#,
        )
        .bind(score.judge_id)
        .bind(score.team_id)
        .bind(score.phase)
        .bind(f.canvas_score)
        .bind(f.mvp_score)
        .bind(f.impact)
        .bind(f.business_model)
        .bind(f.innovation)
        .bind(f.viability)
        .bind(f.extra_criterion)
        .bind(&score.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Duplicate(format!(
                "Score already submitted for phase {}",
                score.phase
            )));
        }

        Ok(())
    }
}
