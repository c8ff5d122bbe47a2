use std::collections::BTreeMap;

use thiserror::Error;

use super::name::{ThemeName, UnknownThemeName};
use crate::error::SiteError;

/// Field name used for theme validation errors.
pub const THEME_FIELD: &str = "theme";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Invalid theme selection: {0}")]
    Validation(#[from] UnknownThemeName),

    #[error("No palette is registered for theme '{0}'")]
    MissingPalette(ThemeName),

    #[error("Failed to save theme settings: {0}")]
    Storage(#[from] SiteError),
}

impl ThemeError {
    /// Per-field messages for form display; empty unless this is a
    /// validation failure.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            ThemeError::Validation(err) => BTreeMap::from([(
                THEME_FIELD.to_string(),
                vec![err.to_string()],
            )]),
            _ => BTreeMap::new(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ThemeError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_keyed_by_field() {
        let err = ThemeError::from(UnknownThemeName::new("neon"));
        let fields = err.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields[THEME_FIELD][0].contains("'neon'"));
    }

    #[test]
    fn storage_errors_have_no_field_detail() {
        let err = ThemeError::from(SiteError::Unavailable("down".into()));
        assert!(err.field_errors().is_empty());
        assert_eq!(
            err.to_string(),
            "Failed to save theme settings: Storage unavailable: down"
        );
    }
}
