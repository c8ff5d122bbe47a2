//! Optimistic client-side theme preview.
//!
//! Selecting a theme in the admin panel repaints the page before the write
//! is acknowledged. The work is expressed as a [`PreviewPlan`]: a flat list
//! of [`StyleOp`]s that is replayed against anything implementing
//! [`StyleTarget`]. The server hands the same plan to browsers as JSON.
//!
//! A plan always clears every catalog property and every theme marker class
//! first, so applying theme X and then theme Y never leaves X behind.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::catalog;
use super::name::ThemeName;
use super::registry::ThemeRegistry;

/// Mutable view of the document root.
pub trait StyleTarget {
    fn remove_property(&mut self, property: &str);
    fn set_property(&mut self, property: &str, value: &str);
    fn remove_class(&mut self, class: &str);
    fn add_class(&mut self, class: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StyleOp {
    RemoveProperty { property: String },
    RemoveClass { class: String },
    SetProperty { property: String, value: String },
    AddClass { class: String },
}

impl StyleOp {
    pub fn apply<T: StyleTarget + ?Sized>(&self, target: &mut T) {
        match self {
            StyleOp::RemoveProperty { property } => {
                target.remove_property(property)
            }
            StyleOp::RemoveClass { class } => target.remove_class(class),
            StyleOp::SetProperty { property, value } => {
                target.set_property(property, value)
            }
            StyleOp::AddClass { class } => target.add_class(class),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPlan {
    pub theme: ThemeName,
    pub ops: Vec<StyleOp>,
}

impl PreviewPlan {
    /// Plan against the built-in registry.
    pub fn for_theme(theme: ThemeName) -> Self {
        Self::for_theme_in(&ThemeRegistry::builtin(), theme)
    }

    pub fn for_theme_in(registry: &ThemeRegistry, theme: ThemeName) -> Self {
        let variables = catalog::catalog();
        let mut ops =
            Vec::with_capacity(variables.len() * 2 + ThemeName::ALL.len() + 1);

        ops.extend(variables.iter().map(|variable| StyleOp::RemoveProperty {
            property: variable.css_property(),
        }));
        ops.extend(ThemeName::ALL.iter().map(|name| StyleOp::RemoveClass {
            class: name.marker_class(),
        }));

        if theme.is_default() {
            return Self { theme, ops };
        }

        // Without a palette the root is only cleared.
        let Some(palette) = registry.palette_for(theme) else {
            return Self { theme, ops };
        };

        for variable in variables {
            if let Some(raw) = palette.get(variable.key) {
                ops.push(StyleOp::SetProperty {
                    property: variable.css_property(),
                    value: variable.css_value(raw),
                });
            }
        }
        ops.push(StyleOp::AddClass {
            class: theme.marker_class(),
        });

        Self { theme, ops }
    }

    pub fn apply<T: StyleTarget + ?Sized>(&self, target: &mut T) {
        for op in &self.ops {
            op.apply(target);
        }
    }
}

pub fn apply_preview<T: StyleTarget + ?Sized>(target: &mut T, theme: ThemeName) {
    PreviewPlan::for_theme(theme).apply(target);
}

/// In-memory document root that renders `style` and `class` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineRootStyle {
    properties: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

impl InlineRootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn style_attribute(&self) -> String {
        self.properties
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn class_attribute(&self) -> String {
        self.classes.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

impl StyleTarget for InlineRootStyle {
    fn remove_property(&mut self, property: &str) {
        self.properties.remove(property);
    }

    fn set_property(&mut self, property: &str, value: &str) {
        self.properties
            .insert(property.to_string(), value.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }
}
