use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::infrastructure::memory::InMemoryThemeSettingsRepository;
use crate::database::ports::theme_settings::ThemeSettingsRepository;
#[cfg(feature = "database")]
use crate::database::postgres::PostgresDatabase;

/// Repository ports used by application services.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub theme_settings: Arc<dyn ThemeSettingsRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field(
                "theme_settings",
                &type_name_of_val(self.theme_settings.as_ref()),
            )
            .finish()
    }
}

impl AppUnitOfWork {
    pub fn new(theme_settings: Arc<dyn ThemeSettingsRepository>) -> Self {
        Self { theme_settings }
    }

    #[cfg(feature = "database")]
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        Self {
            theme_settings: Arc::new(db.theme_settings().clone()),
        }
    }

    /// Unit of work over process-local storage. The concrete repository is
    /// returned too so callers can seed data or simulate outages.
    pub fn in_memory() -> (Self, Arc<InMemoryThemeSettingsRepository>) {
        let repo = Arc::new(InMemoryThemeSettingsRepository::new());
        let uow = Self {
            theme_settings: repo.clone(),
        };
        (uow, repo)
    }
}
