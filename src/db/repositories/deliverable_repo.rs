//! Deliverable repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::DeliverableStore,
    error::AppResult,
    models::{Deliverable, NewDeliverable},
};

/// Repository for deliverable database operations
#[derive(Clone)]
pub struct DeliverableRepository {
    pool: PgPool,
}

impl DeliverableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliverableStore for DeliverableRepository {
    async fn upsert(&self, deliverable: &NewDeliverable) -> AppResult<Deliverable> {
        let row = sqlx::query_as::<_, Deliverable>(
            r#"
            INSERT INTO deliverables (team_id, deliverable_type, value, submitted_at, is_late, submitted_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (team_id, deliverable_type) DO UPDATE
            SET value = EXCLUDED.value,
                submitted_at = EXCLUDED.submitted_at,
                is_late = EXCLUDED.is_late,
                submitted_by = EXCLUDED.submitted_by
            RETURNING id, team_id, deliverable_type, value, submitted_at, is_late, submitted_by
            "#,
        )
        .bind(deliverable.team_id)
        .bind(deliverable.deliverable_type)
        .bind(&deliverable.value)
        .bind(deliverable.submitted_at)
        .bind(deliverable.is_late)
        .bind(deliverable.submitted_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<Deliverable>> {
        let rows = sqlx::query_as::<_, Deliverable>(
            r#"
            SELECT id, team_id, deliverable_type, value, submitted_at, is_late, submitted_by
            FROM deliverables
            WHERE team_id = $1
            ORDER BY deliverable_type
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
