pub use folio_config::{
    Config, ConfigGuardRailError, ConfigLoad, ConfigLoadError, ConfigLoader,
    ConfigMetadata, ConfigWarning, ConfigWarnings,
    CorsConfig, DatabaseConfig, HstsSettings, SecurityConfig, ServerConfig,
    ThemeConfig,
};
