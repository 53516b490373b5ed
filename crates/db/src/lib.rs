//! Database layer for the video store.
//!
//! Two independent Postgres sessions back the store: the read-mostly
//! catalog and the rental store. No operation writes to both, so they are
//! modelled as separate pools with no cross-session transaction.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod repositories;
pub mod search;
pub mod store;
pub mod transaction;

pub use config::DbConfig;
pub use error::{StoreError, StoreResult};
pub use store::VideoStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach its database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded catalog and rental-store migrations.
///
/// Both migrators ignore versions they do not know about, so the two
/// schemas may share one physical database.
pub async fn run_migrations(sessions: &Sessions) -> Result<(), sqlx::migrate::MigrateError> {
    let mut catalog = sqlx::migrate!("../../db/migrations/catalog");
    catalog.set_ignore_missing(true);
    catalog.run(&sessions.catalog).await?;

    let mut rentals = sqlx::migrate!("../../db/migrations/rentals");
    rentals.set_ignore_missing(true);
    rentals.run(&sessions.rentals).await?;

    Ok(())
}

/// The catalog and rental-store sessions.
///
/// Each is a pool, so every transaction checks out its own connection and
/// concurrent callers never share one.
#[derive(Debug, Clone)]
pub struct Sessions {
    pub catalog: DbPool,
    pub rentals: DbPool,
}

impl Sessions {
    /// Wrap two already-open pools.
    pub fn new(catalog: DbPool, rentals: DbPool) -> Self {
        Self { catalog, rentals }
    }

    /// Open both sessions and verify they answer.
    ///
    /// If the rental store cannot be reached the catalog pool is closed
    /// before the error is returned.
    pub async fn connect(config: &DbConfig) -> StoreResult<Self> {
        let catalog = create_pool(&config.catalog_url, config).await?;
        tracing::info!("Catalog connection pool created");

        let rentals = match create_pool(&config.rental_url, config).await {
            Ok(pool) => pool,
            Err(e) => {
                catalog.close().await;
                return Err(e.into());
            }
        };
        tracing::info!("Rental store connection pool created");

        let sessions = Self::new(catalog, rentals);
        if let Err(e) = sessions.check().await {
            sessions.close().await;
            return Err(e);
        }
        tracing::info!("Database health checks passed");

        if config.run_migrations {
            if let Err(e) = run_migrations(&sessions).await {
                sessions.close().await;
                return Err(e.into());
            }
            tracing::info!("Database migrations applied");
        }

        Ok(sessions)
    }

    async fn check(&self) -> StoreResult<()> {
        health_check(&self.catalog).await?;
        health_check(&self.rentals).await?;
        Ok(())
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.rentals.close().await;
        self.catalog.close().await;
        tracing::info!("Database sessions closed");
    }
}
