pub mod theme_settings;
