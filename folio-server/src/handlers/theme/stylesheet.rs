use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use folio_core::domain::theme::{SettingSource, render_stylesheet};
use tracing::debug;

use crate::infra::app_state::AppState;

pub const THEME_REVISION_HEADER: &str = "x-theme-revision";

/// GET /theme.css - `:root` custom properties for the active theme.
pub async fn theme_stylesheet_handler(
    State(state): State<AppState>,
) -> Response {
    let revision = state.theme_events().revision();

    let css = match state.stylesheet_cache().get(revision) {
        Some(css) => css,
        None => {
            let active = state.theme_store().get_active_theme().await;
            let css = render_stylesheet(&active.palette);
            // A fallback render must not outlive the outage that caused it.
            if active.source == SettingSource::Fallback {
                css.into()
            } else {
                debug!(
                    revision,
                    theme = %active.name,
                    "Rendered theme stylesheet"
                );
                state.stylesheet_cache().store(revision, css)
            }
        }
    };

    let mut response = css.to_string().into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/css; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(THEME_REVISION_HEADER, HeaderValue::from(revision));
    response
}
