pub mod catalog;
pub mod events;
pub mod settings;
pub mod stylesheet;

pub use catalog::{
    list_themes_handler, theme_preview_handler, theme_variables_handler,
};
pub use events::theme_events_sse_handler;
pub use settings::{get_theme_settings_handler, update_theme_settings_handler};
pub use stylesheet::theme_stylesheet_handler;
