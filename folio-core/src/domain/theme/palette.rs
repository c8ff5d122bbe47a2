use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog;

/// Token key to raw value mapping for one theme.
///
/// Palettes loaded from storage may be partial or carry keys the catalog no
/// longer knows about; [`ThemePalette::is_complete`] and
/// [`ThemePalette::missing_keys`] answer the question against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemePalette(BTreeMap<String, String>);

impl ThemePalette {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every catalog token has a non-blank value.
    pub fn is_complete(&self) -> bool {
        catalog::catalog()
            .iter()
            .all(|variable| self.has_value(variable.key))
    }

    pub fn missing_keys(&self) -> Vec<&'static str> {
        catalog::catalog()
            .iter()
            .filter(|variable| !self.has_value(variable.key))
            .map(|variable| variable.key)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    fn has_value(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|value| !value.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ThemePalette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for ThemePalette {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self(values)
    }
}
