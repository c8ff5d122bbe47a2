//! Site-wide active theme, read and written through a repository port.
//!
//! Reads never fail: whatever is (or is not) in storage, callers get a
//! complete palette. Writes validate the requested name, resolve its palette
//! from the registry and replace the stored record in a single upsert.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};

use crate::application::theme_events::ThemeEventBus;
use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::theme_settings::{
    StoredThemeRecord, ThemeSettingsRepository,
};
use crate::domain::theme::{
    ActiveThemeSetting, SettingSource, ThemeError, ThemeName, ThemePalette,
    ThemeRegistry, catalog,
};
use crate::error::Result;

#[derive(Clone)]
pub struct ThemeSettingsStore {
    repo: Arc<dyn ThemeSettingsRepository>,
    registry: Arc<ThemeRegistry>,
    events: Arc<ThemeEventBus>,
    settings_key: String,
}

impl fmt::Debug for ThemeSettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSettingsStore")
            .field("settings_key", &self.settings_key)
            .field("revision", &self.events.revision())
            .finish_non_exhaustive()
    }
}

impl ThemeSettingsStore {
    pub fn new(
        uow: &AppUnitOfWork,
        events: Arc<ThemeEventBus>,
        settings_key: impl Into<String>,
    ) -> Self {
        Self {
            repo: Arc::clone(&uow.theme_settings),
            registry: ThemeRegistry::builtin(),
            events,
            settings_key: settings_key.into(),
        }
    }

    pub fn with_registry(mut self, registry: Arc<ThemeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings_key(&self) -> &str {
        &self.settings_key
    }

    pub fn registry(&self) -> &Arc<ThemeRegistry> {
        &self.registry
    }

    pub fn events(&self) -> &Arc<ThemeEventBus> {
        &self.events
    }

    /// Current theme with a complete palette. Never fails.
    pub async fn get_active_theme(&self) -> ActiveThemeSetting {
        match self.repo.load(&self.settings_key).await {
            Ok(Some(record)) => self.resolve_record(record),
            Ok(None) => self.create_default().await,
            Err(err) => {
                warn!(
                    settings_key = %self.settings_key,
                    error = %err,
                    "Theme settings unavailable; serving default theme"
                );
                self.fallback()
            }
        }
    }

    pub async fn set_active_theme(
        &self,
        raw_name: &str,
    ) -> std::result::Result<ActiveThemeSetting, ThemeError> {
        let name: ThemeName = raw_name.parse()?;

        let palette = self
            .registry
            .palette_for(name)
            .cloned()
            .ok_or(ThemeError::MissingPalette(name))?;

        let updated_at = storage_now();
        let record = StoredThemeRecord::new(name, &palette, updated_at);
        if let Err(err) = self.repo.save(&self.settings_key, &record).await {
            warn!(
                settings_key = %self.settings_key,
                theme = %name,
                error = %err,
                "Failed to save theme settings"
            );
            return Err(ThemeError::Storage(err));
        }

        let event = self.events.publish(name, updated_at);
        info!(
            theme = %name,
            revision = event.revision,
            "Active theme updated"
        );

        Ok(ActiveThemeSetting {
            name,
            palette,
            updated_at,
            source: SettingSource::Stored,
        })
    }

    /// Turn a raw stored record into a usable setting, repairing it in
    /// memory when needed. Repairs are not written back.
    pub fn resolve_record(
        &self,
        record: StoredThemeRecord,
    ) -> ActiveThemeSetting {
        let name = match record.active_theme_name.parse::<ThemeName>() {
            Ok(name) => name,
            Err(err) => {
                warn!(
                    stored_name = %err.input(),
                    "Stored theme name is not recognised; using default"
                );
                return self.fallback();
            }
        };

        let palette = ThemePalette::from(record.active_theme_palette);
        if palette.is_complete() {
            return ActiveThemeSetting {
                name,
                palette,
                updated_at: record.updated_at,
                source: SettingSource::Stored,
            };
        }

        match self.registry.palette_for(name) {
            Some(registry_palette) => {
                debug!(
                    theme = %name,
                    missing = palette.missing_keys().len(),
                    "Stored palette incomplete; using registry palette"
                );
                ActiveThemeSetting {
                    name,
                    palette: registry_palette.clone(),
                    updated_at: record.updated_at,
                    source: SettingSource::Healed,
                }
            }
            None => {
                warn!(theme = %name, "No registry palette for stored theme");
                self.fallback()
            }
        }
    }

    /// Whether the backing storage answers.
    pub async fn storage_health(&self) -> Result<()> {
        self.repo.ping().await
    }

    async fn create_default(&self) -> ActiveThemeSetting {
        let name = ThemeName::Default;
        let palette = self.default_palette();
        let record = StoredThemeRecord::new(name, &palette, storage_now());

        match self.repo.insert_if_absent(&self.settings_key, &record).await {
            Ok(stored) if stored == record => {
                info!(
                    settings_key = %self.settings_key,
                    "Created default theme settings"
                );
                ActiveThemeSetting {
                    name,
                    palette,
                    updated_at: record.updated_at,
                    source: SettingSource::Created,
                }
            }
            // Another writer got there first.
            Ok(stored) => self.resolve_record(stored),
            Err(err) => {
                warn!(
                    settings_key = %self.settings_key,
                    error = %err,
                    "Failed to persist default theme settings"
                );
                self.fallback()
            }
        }
    }

    fn default_palette(&self) -> ThemePalette {
        self.registry
            .palette_for(ThemeName::Default)
            .cloned()
            .unwrap_or_else(catalog::default_palette)
    }

    fn fallback(&self) -> ActiveThemeSetting {
        ActiveThemeSetting {
            name: ThemeName::Default,
            palette: self.default_palette(),
            updated_at: Utc::now(),
            source: SettingSource::Fallback,
        }
    }
}

/// Current time at the precision PostgreSQL keeps, so a written record
/// compares equal to the same record read back.
fn storage_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::infrastructure::memory::InMemoryThemeSettingsRepository;
    use crate::database::ports::theme_settings::MockThemeSettingsRepository;
    use crate::domain::theme::THEME_FIELD;
    use crate::error::SiteError;
    use std::collections::BTreeMap;

    const KEY: &str = "site-theme";

    fn memory_store()
    -> (ThemeSettingsStore, Arc<InMemoryThemeSettingsRepository>) {
        let (uow, repo) = AppUnitOfWork::in_memory();
        let store =
            ThemeSettingsStore::new(&uow, Arc::new(ThemeEventBus::new(8)), KEY);
        (store, repo)
    }

    fn mock_store(mock: MockThemeSettingsRepository) -> ThemeSettingsStore {
        let uow = AppUnitOfWork::new(Arc::new(mock));
        ThemeSettingsStore::new(&uow, Arc::new(ThemeEventBus::new(8)), KEY)
    }

    fn builtin(name: ThemeName) -> ThemePalette {
        ThemeRegistry::builtin()
            .palette_for(name)
            .cloned()
            .expect("builtin palette")
    }

    fn raw_record(
        name: &str,
        palette: BTreeMap<String, String>,
    ) -> StoredThemeRecord {
        StoredThemeRecord {
            active_theme_name: name.to_string(),
            active_theme_palette: palette,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn set_then_get_yields_registry_palette_for_every_theme() {
        let (store, _repo) = memory_store();
        for name in ThemeName::ALL {
            let written = store
                .set_active_theme(name.as_str())
                .await
                .expect("set succeeds");
            assert_eq!(written.name, name);

            let read = store.get_active_theme().await;
            assert_eq!(read.name, name);
            assert_eq!(read.palette, builtin(name));
            assert_eq!(read.source, SettingSource::Stored);
        }
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_without_writing() {
        let (store, repo) = memory_store();
        store.set_active_theme("sunset-glow").await.expect("seed");
        let before = repo.snapshot(KEY).await;
        let revision = store.events().revision();

        let err = store
            .set_active_theme("not-a-real-theme")
            .await
            .expect_err("validation fails");

        assert!(err.is_validation());
        assert!(err.field_errors().contains_key(THEME_FIELD));
        assert_eq!(repo.snapshot(KEY).await, before);
        assert_eq!(store.events().revision(), revision);
    }

    #[tokio::test]
    async fn deleted_record_never_fails_reads() {
        let (store, repo) = memory_store();
        store.set_active_theme("cyber-punk").await.expect("seed");
        repo.remove(KEY).await;

        let read = store.get_active_theme().await;
        assert_eq!(read.name, ThemeName::Default);
        assert!(read.palette.is_complete());
        assert_eq!(read.source, SettingSource::Created);
    }

    #[tokio::test]
    async fn partial_palette_is_healed_from_registry() {
        let (store, repo) = memory_store();
        let partial = BTreeMap::from([(
            "background".to_string(),
            "0 0% 0%".to_string(),
        )]);
        repo.seed(KEY, raw_record("rose-garden", partial.clone()))
            .await;

        let read = store.get_active_theme().await;
        assert_eq!(read.name, ThemeName::RoseGarden);
        assert_eq!(read.palette, builtin(ThemeName::RoseGarden));
        assert_eq!(read.source, SettingSource::Healed);

        // Healing happens in memory only.
        let stored = repo.snapshot(KEY).await.expect("record kept");
        assert_eq!(stored.active_theme_palette, partial);
    }

    #[tokio::test]
    async fn unknown_stored_name_falls_back_to_default() {
        let (store, repo) = memory_store();
        repo.seed(
            KEY,
            raw_record("vaporwave", builtin(ThemeName::CyberPunk).into_inner()),
        )
        .await;

        let read = store.get_active_theme().await;
        assert_eq!(read.name, ThemeName::Default);
        assert_eq!(read.palette, builtin(ThemeName::Default));
        assert_eq!(read.source, SettingSource::Fallback);
    }

    #[tokio::test]
    async fn empty_store_round_trip() {
        let (store, repo) = memory_store();
        assert!(repo.snapshot(KEY).await.is_none());

        let first = store.get_active_theme().await;
        assert_eq!(first.name, ThemeName::Default);
        let persisted = repo.snapshot(KEY).await.expect("default persisted");
        assert_eq!(persisted.active_theme_name, "default");

        store
            .set_active_theme("forest-green")
            .await
            .expect("set succeeds");

        let read = store.get_active_theme().await;
        assert_eq!(read.name, ThemeName::ForestGreen);
        assert_eq!(read.palette, builtin(ThemeName::ForestGreen));
    }

    #[tokio::test]
    async fn concurrent_identical_writes_leave_one_consistent_palette() {
        let (store, repo) = memory_store();
        let (a, b) = tokio::join!(
            store.set_active_theme("midnight-gradient"),
            store.set_active_theme("midnight-gradient"),
        );
        assert!(a.is_ok() && b.is_ok());

        let stored = repo.snapshot(KEY).await.expect("record written");
        assert_eq!(stored.active_theme_name, "midnight-gradient");
        assert_eq!(
            ThemePalette::from(stored.active_theme_palette),
            builtin(ThemeName::MidnightGradient)
        );
        assert_eq!(store.events().revision(), 2);
    }

    #[tokio::test]
    async fn concurrent_different_writes_never_interleave() {
        let (store, repo) = memory_store();
        let _ = tokio::join!(
            store.set_active_theme("ocean-depth"),
            store.set_active_theme("arctic-frost"),
        );

        let stored = repo.snapshot(KEY).await.expect("record written");
        let name: ThemeName =
            stored.active_theme_name.parse().expect("valid name");
        assert_eq!(
            ThemePalette::from(stored.active_theme_palette),
            builtin(name)
        );
    }

    #[tokio::test]
    async fn storage_outage_on_read_serves_default() {
        let (store, repo) = memory_store();
        store.set_active_theme("ocean-depth").await.expect("seed");
        repo.set_unavailable(true);

        let read = store.get_active_theme().await;
        assert_eq!(read.name, ThemeName::Default);
        assert_eq!(read.source, SettingSource::Fallback);
        assert!(store.storage_health().await.is_err());
    }

    #[tokio::test]
    async fn failed_default_insert_still_serves_default() {
        let mut mock = MockThemeSettingsRepository::new();
        mock.expect_load().returning(|_| Ok(None));
        mock.expect_insert_if_absent()
            .times(1)
            .returning(|_, _| Err(SiteError::Internal("disk full".into())));

        let read = mock_store(mock).get_active_theme().await;
        assert_eq!(read.name, ThemeName::Default);
        assert_eq!(read.source, SettingSource::Fallback);
        assert!(read.palette.is_complete());
    }

    #[tokio::test]
    async fn save_failure_surfaces_as_storage_error_without_retry() {
        let mut mock = MockThemeSettingsRepository::new();
        mock.expect_save()
            .times(1)
            .returning(|_, _| Err(SiteError::Unavailable("timeout".into())));

        let store = mock_store(mock);
        let err = store
            .set_active_theme("sunset-glow")
            .await
            .expect_err("save fails");

        assert!(matches!(err, ThemeError::Storage(_)));
        assert!(err.to_string().contains("timeout"));
        assert_eq!(store.events().revision(), 0);
    }

    #[tokio::test]
    async fn missing_registry_palette_is_reported() {
        let mut mock = MockThemeSettingsRepository::new();
        mock.expect_save().never();

        let registry = ThemeRegistry::new(
            [(ThemeName::Default, builtin(ThemeName::Default))]
                .into_iter()
                .collect(),
        );
        let store = mock_store(mock).with_registry(Arc::new(registry));

        let err = store
            .set_active_theme("forest-green")
            .await
            .expect_err("no palette");
        assert!(matches!(
            err,
            ThemeError::MissingPalette(ThemeName::ForestGreen)
        ));
    }

    #[tokio::test]
    async fn successful_write_notifies_subscribers() {
        let (store, _repo) = memory_store();
        let mut rx = store.events().subscribe();

        store.set_active_theme("cyber-punk").await.expect("set");

        let event = rx.recv().await.expect("event");
        assert_eq!(event.name, ThemeName::CyberPunk);
        assert_eq!(event.revision, 1);
    }

    #[tokio::test]
    async fn lost_insert_race_returns_winner() {
        let mut mock = MockThemeSettingsRepository::new();
        mock.expect_load().returning(|_| Ok(None));
        mock.expect_insert_if_absent().returning(|_, _| {
            Ok(StoredThemeRecord::new(
                ThemeName::OceanDepth,
                &builtin(ThemeName::OceanDepth),
                Utc::now(),
            ))
        });

        let read = mock_store(mock).get_active_theme().await;
        assert_eq!(read.name, ThemeName::OceanDepth);
        assert_eq!(read.source, SettingSource::Stored);
    }
}
