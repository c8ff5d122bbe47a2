use axum::{Router, routing::get};

use crate::{AppState, handlers::theme};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Theme catalog
        .route("/themes", get(theme::list_themes_handler))
        .route("/themes/variables", get(theme::theme_variables_handler))
        .route("/themes/{name}/preview", get(theme::theme_preview_handler))
        // Active theme
        .route(
            "/settings/theme",
            get(theme::get_theme_settings_handler)
                .put(theme::update_theme_settings_handler),
        )
        .route(
            "/settings/theme/events",
            get(theme::theme_events_sse_handler),
        )
}

