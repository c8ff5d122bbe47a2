//! Shared configuration library for Folio.
//!
//! Centralizes config loading (`.env`, `folio.toml`, environment overrides)
//! and the guard rails applied before the server starts. `folio-server`
//! re-exports these types so there is a single source of truth for defaults
//! and validation rules.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, HstsSettings,
    SecurityConfig, ServerConfig, ThemeConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
