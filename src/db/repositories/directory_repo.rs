//! Team and judge directory repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::Directory,
    error::AppResult,
    models::{Judge, Team, normalize_conflicts},
};

/// Repository for teams and judge entries
#[derive(Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for DirectoryRepository {
    async fn resolve_team(&self, numero: i32) -> AppResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE numero = $1"#)
            .bind(numero)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    async fn resolve_judge(&self, email: &str) -> AppResult<Option<Judge>> {
        let judge = sqlx::query_as::<_, Judge>(r#"SELECT * FROM judges WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(judge)
    }

    async fn create_team(&self, numero: i32, name: &str) -> AppResult<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (numero, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(numero)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    async fn set_judge_conflicts(&self, email: &str, numeros: Vec<i32>) -> AppResult<Option<Judge>> {
        let judge = sqlx::query_as::<_, Judge>(
            r#"
            UPDATE judges
            SET conflict_team_numbers = $2
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(normalize_conflicts(numeros))
        .fetch_optional(&self.pool)
        .await?;

        Ok(judge)
    }
}
