use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Folio is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Reports settings storage reachability. Answers 503 while the store is
/// down; theme reads keep serving the default theme in the meantime.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let store_kind = if state.postgres().is_some() {
        "postgres"
    } else {
        "memory"
    };

    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let status = match state.theme_store().storage_health().await {
        Ok(()) => {
            health_status["checks"]["settings_store"] = json!({
                "status": "healthy",
                "kind": store_kind,
            });
            StatusCode::OK
        }
        Err(err) => {
            warn!(error = %err, "Settings storage health check failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["settings_store"] = json!({
                "status": "unhealthy",
                "kind": store_kind,
                "error": err.to_string()
            });
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    health_status["checks"]["theme_events"] = json!({
        "revision": state.theme_events().revision(),
        "subscribers": state.theme_events().receiver_count(),
        "stylesheet_cache": state.stylesheet_cache().is_enabled(),
    });

    (status, Json(health_status))
}
