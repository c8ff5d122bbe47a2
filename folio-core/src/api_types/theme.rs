use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::theme::{
    ActiveThemeSetting, SettingSource, ThemeDescriptor, ThemeName,
    ThemePalette, ThemeVariable,
};

/// Body of `PUT /api/v1/settings/theme`.
///
/// The name stays a raw string so that invalid selections reach validation
/// and come back as field errors rather than a JSON rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveThemeResponse {
    pub theme: ThemeName,
    pub palette: ThemePalette,
    pub updated_at: DateTime<Utc>,
    pub source: SettingSource,
}

impl From<ActiveThemeSetting> for ActiveThemeResponse {
    fn from(setting: ActiveThemeSetting) -> Self {
        Self {
            theme: setting.name,
            palette: setting.palette,
            updated_at: setting.updated_at,
            source: setting.source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeListResponse {
    pub themes: Vec<ThemeDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeVariablesResponse {
    pub variables: Vec<ThemeVariableDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeVariableDto {
    #[serde(flatten)]
    pub variable: ThemeVariable,
    pub css_property: String,
}

impl From<&ThemeVariable> for ThemeVariableDto {
    fn from(variable: &ThemeVariable) -> Self {
        Self {
            variable: *variable,
            css_property: variable.css_property(),
        }
    }
}
