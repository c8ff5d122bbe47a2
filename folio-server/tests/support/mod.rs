#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum_test::TestServer;
use folio_core::{
    application::AppUnitOfWork,
    database::infrastructure::memory::InMemoryThemeSettingsRepository,
};
use folio_server::{
    AppState,
    app::create_app,
    infra::config::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, HstsSettings,
        SecurityConfig, ServerConfig, ThemeConfig,
    },
};

pub const SETTINGS_KEY: &str = "site-theme";

/// Dev-mode configuration backed by the in-memory settings store.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            primary_url: None,
            max_connections: 1,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".into()],
            allowed_methods: vec!["GET".into(), "PUT".into()],
            allowed_headers: vec!["Content-Type".into()],
            allow_credentials: false,
        },
        security: SecurityConfig {
            enforce_https: false,
            trust_proxy_headers: false,
            hsts: HstsSettings {
                max_age: 31_536_000,
                include_subdomains: false,
                preload: false,
            },
        },
        theme: ThemeConfig {
            settings_key: SETTINGS_KEY.into(),
            event_buffer: 16,
            stylesheet_cache: true,
        },
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repo: Arc<InMemoryThemeSettingsRepository>,
}

impl TestApp {
    pub fn server(&self) -> Result<TestServer> {
        TestServer::new(self.router.clone())
            .map_err(|err| anyhow::anyhow!(err.to_string()))
    }
}

pub fn build_test_app_with(config: Config) -> TestApp {
    let (unit_of_work, repo) = AppUnitOfWork::in_memory();
    let state = AppState::new(Arc::new(config), Arc::new(unit_of_work), None);
    let router = create_app(state.clone(), false);

    TestApp {
        router,
        state,
        repo,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}
