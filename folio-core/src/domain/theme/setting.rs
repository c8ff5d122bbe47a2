use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::name::ThemeName;
use super::palette::ThemePalette;

/// How the active setting returned by a read was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingSource {
    /// Stored record was valid and returned as-is.
    Stored,
    /// Stored name was valid but its palette was incomplete; the palette came
    /// from the registry.
    Healed,
    /// Stored record was unusable or storage failed; the default theme was
    /// substituted.
    Fallback,
    /// No record existed and the default was written.
    Created,
}

/// The site-wide theme currently in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveThemeSetting {
    pub name: ThemeName,
    pub palette: ThemePalette,
    pub updated_at: DateTime<Utc>,
    pub source: SettingSource,
}

impl ActiveThemeSetting {
    pub fn is_persisted(&self) -> bool {
        matches!(
            self.source,
            SettingSource::Stored | SettingSource::Created
        )
    }
}
