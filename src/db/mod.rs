//! Database module
//!
//! This module handles database connections, migrations, the store
//! interfaces and their repositories.

pub mod connection;
pub mod repositories;
pub mod store;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub mod test_support;

use sqlx::PgPool;

pub use connection::*;
pub use store::*;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
