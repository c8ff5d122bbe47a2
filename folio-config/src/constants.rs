/// Identifier of the singleton settings document holding the active theme.
pub const DEFAULT_THEME_SETTINGS_KEY: &str = "site-theme";

/// Capacity of the theme change broadcast channel.
pub const DEFAULT_THEME_EVENT_BUFFER: usize = 16;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

pub const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;
