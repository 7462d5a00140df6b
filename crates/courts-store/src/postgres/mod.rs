//! PostgreSQL/PostGIS storage adapter implementation

pub mod config;
pub mod facility;
pub mod migrations;

pub use config::{ConfigError, MigrationConfig, PoolConfig, PostgresConfig};
pub use migrations::{MigrationError, MigrationManager};

use courts_core::error::{CourtsError, Result};
use courts_geo::GreatCircle;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    model: GreatCircle,
}

impl PostgresStore {
    /// Connect to PostgreSQL and run migrations when `config.migrations.auto_run` is set.
    ///
    /// `model` is the distance model the engine filters with; radius queries
    /// are widened so the store never drops a facility the model keeps.
    pub async fn connect(config: PostgresConfig, model: GreatCircle) -> Result<Self> {
        config.validate().map_err(|e| CourtsError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                CourtsError::store_unavailable(format!("Failed to connect to database: {}", e))
            })?;

        let store = Self { pool, model };
        store.ping().await?;

        if config.migrations.auto_run {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .run_migrations()
            .await
            .map_err(|e| CourtsError::store_unavailable(format!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CourtsError::store_unavailable(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
