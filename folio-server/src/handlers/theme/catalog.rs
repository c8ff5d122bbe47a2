use axum::{
    extract::{Path, State},
    response::Json,
};
use folio_core::{
    api_types::{
        ApiResponse, ThemeListResponse, ThemeVariableDto,
        ThemeVariablesResponse,
    },
    domain::theme::{PreviewPlan, ThemeName, catalog},
};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// GET /api/v1/themes - theme cards for the selector.
pub async fn list_themes_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<ThemeListResponse>> {
    let themes = state.theme_store().registry().descriptors();
    Json(ApiResponse::success(ThemeListResponse { themes }))
}

/// GET /api/v1/themes/variables
pub async fn theme_variables_handler()
-> Json<ApiResponse<ThemeVariablesResponse>> {
    let variables = catalog::catalog()
        .iter()
        .map(ThemeVariableDto::from)
        .collect();
    Json(ApiResponse::success(ThemeVariablesResponse { variables }))
}

/// GET /api/v1/themes/{name}/preview - style operations that repaint the
/// document root for `name`.
pub async fn theme_preview_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<PreviewPlan>>> {
    let theme: ThemeName = name
        .parse()
        .map_err(|err: folio_core::domain::theme::UnknownThemeName| {
            AppError::not_found(err.to_string())
        })?;

    let plan =
        PreviewPlan::for_theme_in(state.theme_store().registry(), theme);
    Ok(Json(ApiResponse::success(plan)))
}
