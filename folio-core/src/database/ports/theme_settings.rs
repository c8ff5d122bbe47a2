use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::theme::{ThemeName, ThemePalette};
use crate::error::Result;

/// The theme document exactly as persisted.
///
/// Nothing here is validated: the name may not be a known theme and the
/// palette may be partial. Repair happens in the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredThemeRecord {
    pub active_theme_name: String,
    pub active_theme_palette: BTreeMap<String, String>,
    pub updated_at: DateTime<Utc>,
}

impl StoredThemeRecord {
    pub fn new(
        name: ThemeName,
        palette: &ThemePalette,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            active_theme_name: name.as_str().to_string(),
            active_theme_palette: palette.as_map().clone(),
            updated_at,
        }
    }
}

/// Read a stored palette document leniently.
///
/// Non-object documents yield an empty palette and non-string values are
/// dropped, leaving the gaps for the store to notice.
pub fn palette_from_json(value: Option<Value>) -> BTreeMap<String, String> {
    match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

pub fn palette_to_json(palette: &BTreeMap<String, String>) -> Value {
    Value::Object(
        palette
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}

/// Singleton settings documents keyed by `settings_key`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThemeSettingsRepository: Send + Sync {
    async fn load(&self, settings_key: &str)
    -> Result<Option<StoredThemeRecord>>;

    /// Replace the whole record in one write.
    async fn save(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<()>;

    /// Write `record` only if no record exists; returns whichever record is
    /// stored afterwards.
    async fn insert_if_absent(
        &self,
        settings_key: &str,
        record: &StoredThemeRecord,
    ) -> Result<StoredThemeRecord>;

    async fn ping(&self) -> Result<()>;
}
