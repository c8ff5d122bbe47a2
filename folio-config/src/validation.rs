use thiserror::Error;

use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("theme settings key must not be empty")]
    EmptyThemeSettingsKey,
    #[error("theme event buffer must be at least 1")]
    ZeroThemeEventBuffer,
    #[error(
        "CORS allow_credentials cannot be combined with a wildcard origin"
    )]
    WildcardCredentials,
    #[error(
        "no PostgreSQL connection configured; set DATABASE_URL or enable dev_mode for the in-memory store"
    )]
    MissingDatabase,
    #[error("database max_connections must be at least 1")]
    ZeroMaxConnections,
}

/// Reject configurations the server cannot run with and collect warnings for
/// ones it can run with but probably should not.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.theme.settings_key.trim().is_empty() {
        return Err(ConfigGuardRailError::EmptyThemeSettingsKey);
    }
    if config.theme.event_buffer == 0 {
        return Err(ConfigGuardRailError::ZeroThemeEventBuffer);
    }
    if config.database.max_connections == 0 {
        return Err(ConfigGuardRailError::ZeroMaxConnections);
    }
    if config.cors.allow_credentials && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::WildcardCredentials);
    }

    if config.database.primary_url.is_none() {
        if !config.dev_mode {
            return Err(ConfigGuardRailError::MissingDatabase);
        }
        warnings.push_with_hint(
            "No database configured; theme settings will be kept in memory and lost on restart",
            "Set DATABASE_URL to persist the active theme",
        );
    }

    if config.dev_mode && config.security.enforce_https {
        warnings.push("enforce_https is ignored while dev_mode is enabled");
    }

    Ok(warnings)
}
