//! Postgres fixtures for repository tests
//!
//! One container is started lazily and shared by the whole test binary. Each
//! test gets its own freshly migrated database inside it.
//!
//! Tests using these fixtures need a Docker daemon and are marked `#[ignore]`;
//! run them with `cargo test -- --ignored`.

use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    db::{
        Directory, UserStore,
        repositories::{DirectoryRepository, UserRepository},
    },
    models::{NewUser, Role, Team, User},
};

struct SharedPostgres {
    _container: ContainerAsync<Postgres>,
    base_url: String,
}

static POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

async fn start_postgres() -> SharedPostgres {
    let container = Postgres::default()
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    SharedPostgres {
        _container: container,
        base_url: format!("postgres://postgres:postgres@{}:{}", host, port),
    }
}

/// A pool on a new, migrated database
pub async fn fresh_pool() -> PgPool {
    let shared = POSTGRES.get_or_init(start_postgres).await;
    let database = format!("hackjudge_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::connect(&format!("{}/postgres", shared.base_url))
        .await
        .expect("Failed to connect to test server");
    sqlx::query(&format!(r#"CREATE DATABASE "{}""#, database))
        .execute(&mut admin)
        .await
        .expect("Failed to create test database");
    admin.close().await.ok();

    let pool = PgPool::connect(&format!("{}/{}", shared.base_url, database))
        .await
        .expect("Failed to connect to test database");
    crate::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn seed_team(pool: &PgPool, numero: i32) -> Team {
    DirectoryRepository::new(pool.clone())
        .create_team(numero, &format!("Team {}", numero))
        .await
        .unwrap()
}

pub async fn seed_user(pool: &PgPool, email: &str, role: Role, team: Option<&Team>) -> User {
    UserRepository::new(pool.clone())
        .create(&NewUser {
            email: email.to_string(),
            name: None,
            password_hash: "not-a-real-hash".to_string(),
            role,
            team_id: team.map(|t| t.id),
        })
        .await
        .unwrap()
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
