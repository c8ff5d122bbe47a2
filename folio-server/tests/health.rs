use anyhow::Result;
use axum::http::{StatusCode, header};
use folio_core::api::routes::{site, v1};
use serde_json::Value;

#[path = "support/mod.rs"]
mod support;
use support::{build_test_app, build_test_app_with, test_config};

#[tokio::test]
async fn ping_reports_version() -> Result<()> {
    let server = build_test_app().server()?;

    let body: Value = server.get(site::PING).await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn health_tracks_settings_storage() -> Result<()> {
    let app = build_test_app();
    let server = app.server()?;

    let healthy = server.get(site::HEALTH).await;
    healthy.assert_status_ok();
    let body: Value = healthy.json();
    assert_eq!(body["checks"]["settings_store"]["kind"], "memory");

    app.repo.set_unavailable(true);
    let down = server.get(site::HEALTH).await;
    down.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = down.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["settings_store"]["status"], "unhealthy");
    Ok(())
}

#[tokio::test]
async fn plain_http_is_redirected_when_https_is_enforced() -> Result<()> {
    let mut config = test_config();
    config.dev_mode = false;
    config.security.enforce_https = true;
    config.security.trust_proxy_headers = true;
    let server = build_test_app_with(config).server()?;

    let redirected = server
        .get(v1::settings::THEME)
        .add_header(header::HOST, "folio.test")
        .await;
    redirected.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        redirected.header(header::LOCATION),
        "https://folio.test/api/v1/settings/theme"
    );

    let proxied = server
        .get(v1::settings::THEME)
        .add_header("x-forwarded-proto", "https")
        .await;
    proxied.assert_status_ok();
    assert_eq!(
        proxied.header(header::STRICT_TRANSPORT_SECURITY),
        "max-age=31536000"
    );
    Ok(())
}
