use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::database::ports::theme_settings::{
    StoredThemeRecord, ThemeSettingsRepository, palette_from_json,
    palette_to_json,
};
use crate::error::{Result, SiteError};

#[derive(Debug, Clone)]
pub struct PostgresThemeSettingsRepository {
    pool: PgPool,
}

impl PostgresThemeSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<StoredThemeRecord> {
        let active_theme_name: String =
            row.try_get("active_theme_name").map_err(|e| {
                SiteError::Internal(format!("Failed to read theme name: {e}"))
            })?;
        let palette: Option<Value> =
            row.try_get("active_theme_palette").map_err(|e| {
                SiteError::Internal(format!(
                    "Failed to read theme palette: {e}"
                ))
            })?;
        let updated_at: DateTime<Utc> =
            row.try_get("updated_at").map_err(|e| {
                SiteError::Internal(format!("Failed to read updated_at: {e}"))
            })?;

        Ok(StoredThemeRecord {
            active_theme_name,
            active_theme_palette: palette_from_json(palette),
            updated_at,
        })
    }
}

fn storage_error(context: &str, err: sqlx::Error) -> SiteError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_) => {
            SiteError::Unavailable(format!("{context}: {err}"))
        }
        other => SiteError::Internal(format!("{context}: {other}")),
    }
}

#[async_trait]
impl ThemeSettingsRepository for PostgresThemeSettingsRepository {
    async fn load(
        &self,
        settings_key: &str,
    ) -> Result<Option<StoredThemeRecord>> {
        let row = sqlx::query(
            r#"
            SELECT active_theme_name, active_theme_palette, updated_at
            FROM site_settings
            WHERE settings_key = $1
            "#,
        )
        .bind(settings_key)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| storage_error("Failed to load theme settings", e))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn save(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO site_settings
                (settings_key, active_theme_name, active_theme_palette, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (settings_key) DO UPDATE
            SET active_theme_name = EXCLUDED.active_theme_name,
                active_theme_palette = EXCLUDED.active_theme_palette,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(settings_key)
        .bind(&record.active_theme_name)
        .bind(palette_to_json(&record.active_theme_palette))
        .bind(record.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| storage_error("Failed to save theme settings", e))?;

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<StoredThemeRecord> {
        sqlx::query(
            r#"
            INSERT INTO site_settings
                (settings_key, active_theme_name, active_theme_palette, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (settings_key) DO NOTHING
            "#,
        )
        .bind(settings_key)
        .bind(&record.active_theme_name)
        .bind(palette_to_json(&record.active_theme_palette))
        .bind(record.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            storage_error("Failed to insert default theme settings", e)
        })?;

        // A concurrent writer may have won the insert; report what is stored.
        self.load(settings_key).await?.ok_or_else(|| {
            SiteError::NotFound(format!(
                "theme settings '{settings_key}' vanished after insert"
            ))
        })
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| storage_error("Settings storage ping failed", e))?;
        Ok(())
    }
}
