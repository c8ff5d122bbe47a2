use std::{fmt, sync::Arc};

use folio_core::{
    application::{AppUnitOfWork, ThemeEventBus, ThemeSettingsStore},
    database::PostgresDatabase,
};

use crate::infra::{cache::StylesheetCache, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub theme_store: Arc<ThemeSettingsStore>,
    pub stylesheet_cache: Arc<StylesheetCache>,
    /// Absent when running against the in-memory store.
    pub postgres: Option<Arc<PostgresDatabase>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("theme_store", &self.theme_store)
            .field("postgres", &self.postgres.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the theme store and stylesheet cache over `unit_of_work`.
    pub fn new(
        config: Arc<Config>,
        unit_of_work: Arc<AppUnitOfWork>,
        postgres: Option<Arc<PostgresDatabase>>,
    ) -> Self {
        let events = Arc::new(ThemeEventBus::new(config.theme.event_buffer));
        let theme_store = Arc::new(ThemeSettingsStore::new(
            &unit_of_work,
            events,
            config.theme.settings_key.clone(),
        ));
        let stylesheet_cache =
            Arc::new(StylesheetCache::new(config.theme.stylesheet_cache));

        Self {
            config,
            unit_of_work,
            theme_store,
            stylesheet_cache,
            postgres,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme_store(&self) -> &Arc<ThemeSettingsStore> {
        &self.theme_store
    }

    pub fn theme_events(&self) -> &Arc<ThemeEventBus> {
        self.theme_store.events()
    }

    pub fn stylesheet_cache(&self) -> &Arc<StylesheetCache> {
        &self.stylesheet_cache
    }

    pub fn postgres(&self) -> Option<&Arc<PostgresDatabase>> {
        self.postgres.as_ref()
    }
}
