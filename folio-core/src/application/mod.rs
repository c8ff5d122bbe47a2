pub mod theme_events;
pub mod theme_settings;
pub mod unit_of_work;

pub use theme_events::{ThemeChanged, ThemeEventBus};
pub use theme_settings::ThemeSettingsStore;
pub use unit_of_work::AppUnitOfWork;
