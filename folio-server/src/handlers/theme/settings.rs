use std::collections::BTreeMap;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use folio_core::{
    api_types::{ActiveThemeResponse, ApiResponse, UpdateThemeRequest},
    domain::theme::THEME_FIELD,
};
use tracing::info;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// GET /api/v1/settings/theme - never fails; storage problems yield the
/// default theme.
pub async fn get_theme_settings_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<ActiveThemeResponse>> {
    let active = state.theme_store().get_active_theme().await;
    Json(ApiResponse::success(active.into()))
}

/// PUT /api/v1/settings/theme
pub async fn update_theme_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpdateThemeRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ActiveThemeResponse>>> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::validation(
            "Invalid theme selection",
            BTreeMap::from([(
                THEME_FIELD.to_string(),
                vec![rejection.body_text()],
            )]),
        )
    })?;

    let active = state.theme_store().set_active_theme(&request.theme).await?;
    info!(theme = %active.name, "Theme updated via settings API");

    Ok(Json(
        ApiResponse::success(ActiveThemeResponse::from(active))
            .with_message("Theme updated successfully"),
    ))
}
