//! PostgreSQL store for cats, missions and targets.
//!
//! - [`repositories`] -- zero-sized query structs taking `&PgPool`.
//! - [`store`] -- adapters implementing the `spycat_core` repository traits
//!   on top of the query structs.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{PgCatStore, PgMissionStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Create a pool, retrying until the database answers or `max_wait` elapses.
///
/// Each attempt connects and runs [`health_check`]; failed attempts are
/// retried every `interval`. Returns the last error once the deadline passes.
pub async fn connect_with_retry(
    database_url: &str,
    max_wait: Duration,
    interval: Duration,
) -> Result<DbPool, sqlx::Error> {
    let deadline = tokio::time::Instant::now() + max_wait;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let result = match create_pool(database_url).await {
            Ok(pool) => match health_check(&pool).await {
                Ok(()) => Ok(pool),
                Err(e) => {
                    pool.close().await;
                    Err(e)
                }
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) if tokio::time::Instant::now() + interval < deadline => {
                tracing::warn!(attempt, error = %e, "Database not ready, retrying");
                tokio::time::sleep(interval).await;
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "Timed out waiting for database");
                return Err(e);
            }
        }
    }
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
