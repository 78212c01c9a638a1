//! Ranking projection reader

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{db::store::RankingView, error::AppResult, models::TeamStanding};

/// Reads the `ranking` view maintained by the database
#[derive(Clone)]
pub struct RankingRepository {
    pool: PgPool,
}

impl RankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingView for RankingRepository {
    async fn standings(&self) -> AppResult<Vec<TeamStanding>> {
        let rows = sqlx::query_as::<_, TeamStanding>(
            r#"
            SELECT position, numero, name, canvas_avg, mvp_avg, pitch_avg, total, scores_count
            FROM ranking
            ORDER BY position, numero
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
