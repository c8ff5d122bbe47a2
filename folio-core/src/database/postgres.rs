use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::{
    database::infrastructure::postgres::repositories::theme_settings::PostgresThemeSettingsRepository,
    error::{Result, SiteError},
};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    theme_settings: PostgresThemeSettingsRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                SiteError::Unavailable(format!(
                    "Database connection failed: {e}"
                ))
            })?;

        info!(max_connections, "Database pool initialized");

        Ok(Self::with_pool(pool, max_connections))
    }

    fn with_pool(pool: PgPool, max_connections: u32) -> Self {
        let theme_settings = PostgresThemeSettingsRepository::new(pool.clone());
        Self {
            pool,
            max_connections,
            theme_settings,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn theme_settings(&self) -> &PostgresThemeSettingsRepository {
        &self.theme_settings
    }

    /// Apply pending migrations from `folio-core/migrations`.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            SiteError::Internal(format!("Failed to run migrations: {e}"))
        })?;
        info!("Database migrations applied");
        Ok(())
    }
}
