pub mod theme_settings;

pub use theme_settings::InMemoryThemeSettingsRepository;
