pub mod sources;

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub security: SecurityConfig,
    pub theme: ThemeConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Whether the server should fall back to the in-memory settings store.
    pub fn uses_ephemeral_store(&self) -> bool {
        self.dev_mode && self.database.primary_url.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub primary_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enforce_https: bool,
    pub trust_proxy_headers: bool,
    pub hsts: HstsSettings,
}

#[derive(Debug, Clone)]
pub struct HstsSettings {
    pub max_age: u64,
    pub include_subdomains: bool,
    pub preload: bool,
}

impl HstsSettings {
    /// Render the `Strict-Transport-Security` header value.
    pub fn header_value(&self) -> String {
        let mut directives = vec![format!("max-age={}", self.max_age)];
        if self.include_subdomains {
            directives.push("includeSubDomains".to_string());
        }
        if self.preload {
            directives.push("preload".to_string());
        }
        directives.join("; ")
    }
}

/// Theme subsystem tuning.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Key of the singleton settings document holding the active theme.
    pub settings_key: String,
    /// Broadcast capacity for theme change notifications. Slow SSE
    /// subscribers that fall further behind than this skip ahead.
    pub event_buffer: usize,
    /// Cache the rendered `/theme.css` stylesheet between theme changes.
    pub stylesheet_cache: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
