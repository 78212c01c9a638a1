//! Phase window repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::PhaseWindowStore,
    error::AppResult,
    models::{Phase, PhaseWindow},
};

/// Repository for phase submission windows
#[derive(Clone)]
pub struct PhaseWindowRepository {
    pool: PgPool,
}

impl PhaseWindowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhaseWindowStore for PhaseWindowRepository {
    async fn window_for(&self, phase: Phase) -> AppResult<Option<PhaseWindow>> {
        let window = sqlx::query_as::<_, PhaseWindow>(
            r#"SELECT phase, starts_at, ends_at FROM phase_windows WHERE phase = $1"#,
        )
        .bind(phase)
        .fetch_optional(&self.pool)
        .await?;

        Ok(window)
    }

    async fn set_window(&self, window: &PhaseWindow) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO phase_windows (phase, starts_at, ends_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (phase) DO UPDATE
            SET starts_at = EXCLUDED.starts_at,
                ends_at = EXCLUDED.ends_at,
                updated_at = NOW()
            "#,
        )
        .bind(window.phase)
        .bind(window.starts_at)
        .bind(window.ends_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_window(&self, phase: Phase) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM phase_windows WHERE phase = $1"#)
            .bind(phase)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
