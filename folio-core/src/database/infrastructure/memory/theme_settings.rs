use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::ports::theme_settings::{
    StoredThemeRecord, ThemeSettingsRepository,
};
use crate::error::{Result, SiteError};

/// Process-local settings storage.
///
/// Backs dev mode when no database is configured, and tests. Outages can be
/// simulated with [`InMemoryThemeSettingsRepository::set_unavailable`].
#[derive(Debug, Default)]
pub struct InMemoryThemeSettingsRepository {
    records: RwLock<HashMap<String, StoredThemeRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryThemeSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`SiteError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Overwrite a record directly, bypassing the store.
    pub async fn seed(&self, settings_key: &str, record: StoredThemeRecord) {
        self.records
            .write()
            .await
            .insert(settings_key.to_string(), record);
    }

    pub async fn remove(&self, settings_key: &str) {
        self.records.write().await.remove(settings_key);
    }

    pub async fn snapshot(
        &self,
        settings_key: &str,
    ) -> Option<StoredThemeRecord> {
        self.records.read().await.get(settings_key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SiteError::Unavailable(
                "in-memory settings storage is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ThemeSettingsRepository for InMemoryThemeSettingsRepository {
    async fn load(
        &self,
        settings_key: &str,
    ) -> Result<Option<StoredThemeRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.get(settings_key).cloned())
    }

    async fn save(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<()> {
        self.check_available()?;
        self.records
            .write()
            .await
            .insert(settings_key.to_string(), record.clone());
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<StoredThemeRecord> {
        self.check_available()?;
        let mut records = self.records.write().await;
        Ok(records
            .entry(settings_key.to_string())
            .or_insert_with(|| record.clone())
            .clone())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
