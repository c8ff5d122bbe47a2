pub mod db_url;
pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::{
    constants::{
        DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_HSTS_MAX_AGE,
        DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_THEME_EVENT_BUFFER,
        DEFAULT_THEME_SETTINGS_KEY,
    },
    models::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, HstsSettings,
        SecurityConfig, ServerConfig, ThemeConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};

pub use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![PathBuf::from("folio.toml"), PathBuf::from("config/folio.toml")]
});

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    /// Use these values instead of reading the process environment.
    env_override: Option<EnvConfig>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.options.env_override = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (env_config, env_file_loaded) = match &self.options.env_override {
            Some(env) => (env.clone(), false),
            None => {
                let loaded = self.load_env_file()?;
                (EnvConfig::gather(), loaded)
            }
        };

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        };

        match result {
            Ok(loaded) => Ok(loaded),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => path.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        debug!(path = %path.display(), "parsed configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

/// Merge file and environment sources; environment values win.
fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No folio.toml detected; falling back to environment variables",
            "Create folio.toml or set FOLIO_CONFIG_PATH to pin configuration",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        cors: file_cors,
        security: file_security,
        theme: file_theme,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
        port: env
            .server_port
            .or(file_server.port)
            .unwrap_or(DEFAULT_SERVER_PORT),
    };

    let database = DatabaseConfig {
        primary_url: db_url::resolve_database_url(&env, &file_database)?,
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .clone()
            .or(file_cors.allowed_origins)
            .unwrap_or_else(default_cors_origins),
        allowed_methods: env
            .cors_allowed_methods
            .clone()
            .or(file_cors.allowed_methods)
            .unwrap_or_else(default_cors_methods),
        allowed_headers: env
            .cors_allowed_headers
            .clone()
            .or(file_cors.allowed_headers)
            .unwrap_or_else(default_cors_headers),
        allow_credentials: env
            .cors_allow_credentials
            .or(file_cors.allow_credentials)
            .unwrap_or(false),
    };

    let security = SecurityConfig {
        enforce_https: env
            .enforce_https
            .or(file_security.enforce_https)
            .unwrap_or(false),
        trust_proxy_headers: env
            .trust_proxy_headers
            .or(file_security.trust_proxy_headers)
            .unwrap_or(false),
        hsts: HstsSettings {
            max_age: env
                .hsts_max_age
                .or(file_security.hsts.max_age)
                .unwrap_or(DEFAULT_HSTS_MAX_AGE),
            include_subdomains: env
                .hsts_include_subdomains
                .or(file_security.hsts.include_subdomains)
                .unwrap_or(false),
            preload: env
                .hsts_preload
                .or(file_security.hsts.preload)
                .unwrap_or(false),
        },
    };

    let theme = ThemeConfig {
        settings_key: env
            .theme_settings_key
            .clone()
            .or(file_theme.settings_key)
            .unwrap_or_else(|| DEFAULT_THEME_SETTINGS_KEY.to_string()),
        event_buffer: env
            .theme_event_buffer
            .or(file_theme.event_buffer)
            .unwrap_or(DEFAULT_THEME_EVENT_BUFFER),
        stylesheet_cache: env
            .theme_stylesheet_cache
            .or(file_theme.stylesheet_cache)
            .unwrap_or(true),
    };

    let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

    let config = Config {
        server,
        database,
        cors,
        security,
        theme,
        dev_mode,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "OPTIONS".to_string(),
    ]
}

fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "X-CSRF-Token".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConfigGuardRailError;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn file_values_are_used_when_env_is_silent() {
        let file = write_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4100

            [database]
            url = "postgres://folio@localhost/folio"

            [theme]
            settings_key = "portfolio"
            event_buffer = 4
            "#,
        );

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(EnvConfig::default())
            .load()
            .expect("config loads");

        assert_eq!(load.config.server.host, "127.0.0.1");
        assert_eq!(load.config.server.port, 4100);
        assert_eq!(load.config.theme.settings_key, "portfolio");
        assert_eq!(load.config.theme.event_buffer, 4);
        assert!(load.config.theme.stylesheet_cache);
        assert_eq!(
            load.config.metadata.config_path.as_deref(),
            Some(file.path())
        );
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn env_overrides_file() {
        let file = write_config(
            r#"
            dev_mode = false

            [server]
            port = 4100

            [database]
            url = "postgres://folio@localhost/folio"
            "#,
        );
        let env = EnvConfig {
            server_port: Some(9000),
            theme_stylesheet_cache: Some(false),
            ..EnvConfig::default()
        };

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(env)
            .load()
            .expect("config loads");

        assert_eq!(load.config.server.port, 9000);
        assert!(!load.config.theme.stylesheet_cache);
        assert_eq!(
            load.config.theme.settings_key,
            DEFAULT_THEME_SETTINGS_KEY
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ConfigLoader::new()
            .with_config_path("/definitely/not/here/folio.toml")
            .with_env(EnvConfig::default())
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_config("[server\nport = ");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(EnvConfig::default())
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn guard_rails_run_after_composition() {
        let file = write_config("dev_mode = false\n");
        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(EnvConfig::default())
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::GuardRail(ConfigGuardRailError::MissingDatabase)
        ));
    }

    #[test]
    fn dev_mode_without_database_warns() {
        let file = write_config("dev_mode = true\n");
        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .with_env(EnvConfig::default())
            .load()
            .expect("dev mode loads");

        assert!(load.config.uses_ephemeral_store());
        assert_eq!(load.warnings.len(), 1);
    }
}
