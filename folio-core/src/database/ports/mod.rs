//! Repository ports implemented by the storage adapters.

pub mod theme_settings;
