use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};

use crate::util::{parse_bool, parse_csv};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub security: FileSecurityConfig,
    #[serde(default)]
    pub theme: FileThemeConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSecurityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,
    #[serde(default)]
    pub hsts: FileHstsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHstsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_buffer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet_cache: Option<bool>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_url_file: Option<PathBuf>,
    pub database_host: Option<String>,
    pub database_port: Option<u16>,
    pub database_user: Option<String>,
    pub database_name: Option<String>,
    pub database_password: Option<String>,
    pub database_password_file: Option<PathBuf>,
    pub database_max_connections: Option<u32>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub cors_allowed_methods: Option<Vec<String>>,
    pub cors_allowed_headers: Option<Vec<String>>,
    pub cors_allow_credentials: Option<bool>,
    pub dev_mode: Option<bool>,
    pub enforce_https: Option<bool>,
    pub trust_proxy_headers: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub hsts_preload: Option<bool>,
    pub theme_settings_key: Option<String>,
    pub theme_event_buffer: Option<usize>,
    pub theme_stylesheet_cache: Option<bool>,
}

impl EnvConfig {
    /// Read configuration from the process environment.
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Used by `gather` and by tests
    /// that must not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = VarLookup(&lookup);

        Self {
            config_path: vars.path("FOLIO_CONFIG_PATH"),
            server_host: vars.string("SERVER_HOST"),
            server_port: vars.parsed("SERVER_PORT"),
            database_url: vars.string("DATABASE_URL"),
            database_url_file: vars.path("DATABASE_URL_FILE"),
            database_host: vars.string("DATABASE_HOST"),
            database_port: vars.parsed("DATABASE_PORT"),
            database_user: vars.string("DATABASE_USER"),
            database_name: vars.string("DATABASE_NAME"),
            database_password: vars.string("DATABASE_PASSWORD"),
            database_password_file: vars.path("DATABASE_PASSWORD_FILE"),
            database_max_connections: vars.parsed("DATABASE_MAX_CONNECTIONS"),
            cors_allowed_origins: vars.csv("CORS_ALLOWED_ORIGINS"),
            cors_allowed_methods: vars.csv("CORS_ALLOWED_METHODS"),
            cors_allowed_headers: vars.csv("CORS_ALLOWED_HEADERS"),
            cors_allow_credentials: vars.flag("CORS_ALLOW_CREDENTIALS"),
            dev_mode: vars.flag("DEV_MODE"),
            enforce_https: vars.flag("ENFORCE_HTTPS"),
            trust_proxy_headers: vars.flag("TRUST_PROXY_HEADERS"),
            hsts_max_age: vars.parsed("HSTS_MAX_AGE"),
            hsts_include_subdomains: vars.flag("HSTS_INCLUDE_SUBDOMAINS"),
            hsts_preload: vars.flag("HSTS_PRELOAD"),
            theme_settings_key: vars.string("THEME_SETTINGS_KEY"),
            theme_event_buffer: vars.parsed("THEME_EVENT_BUFFER"),
            theme_stylesheet_cache: vars.flag("THEME_STYLESHEET_CACHE"),
        }
    }
}

struct VarLookup<'a, F>(&'a F);

impl<F> VarLookup<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn path(&self, name: &str) -> Option<PathBuf> {
        self.string(name).map(PathBuf::from)
    }

    fn parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        self.string(name).and_then(|raw| raw.trim().parse().ok())
    }

    fn flag(&self, name: &str) -> Option<bool> {
        self.string(name).and_then(|raw| parse_bool(&raw))
    }

    fn csv(&self, name: &str) -> Option<Vec<String>> {
        self.string(name).map(|raw| parse_csv(&raw))
    }
}
