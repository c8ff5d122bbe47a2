//! Static catalog of the style tokens a theme can set.
//!
//! Every token maps to a CSS custom property on the document root
//! (`background` -> `--background`). Colour tokens hold a bare HSL triple
//! such as `"222.2 84% 4.9%"` so stylesheets can compose them with alpha;
//! length tokens hold a CSS length.

use serde::Serialize;

use super::palette::ThemePalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Color,
    Length,
}

/// Grouping used by the admin selector to lay out token editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableGroup {
    Base,
    Surface,
    Brand,
    Feedback,
    Chart,
    Sidebar,
    Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeVariable {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: VariableKind,
    pub group: VariableGroup,
    pub default: &'static str,
}

impl ThemeVariable {
    /// Name of the CSS custom property written for this token.
    pub fn css_property(&self) -> String {
        format!("--{}", self.key)
    }

    /// Format a raw token value for use as an inline style value.
    ///
    /// Colour triples are wrapped in `hsl(...)`. Values that are already a
    /// colour function or hex literal pass through untouched, as do lengths.
    pub fn css_value(&self, raw: &str) -> String {
        let raw = raw.trim();
        match self.kind {
            VariableKind::Color if !is_literal_color(raw) => {
                format!("hsl({raw})")
            }
            _ => raw.to_string(),
        }
    }
}

fn is_literal_color(raw: &str) -> bool {
    raw.starts_with('#') || raw.contains('(')
}

const fn color(
    key: &'static str,
    label: &'static str,
    group: VariableGroup,
    default: &'static str,
) -> ThemeVariable {
    ThemeVariable {
        key,
        label,
        kind: VariableKind::Color,
        group,
        default,
    }
}

use VariableGroup::*;

static CATALOG: [ThemeVariable; 39] = [
    color("background", "Background", Base, "0 0% 100%"),
    color("foreground", "Foreground", Base, "222.2 84% 4.9%"),
    color("card", "Card", Surface, "0 0% 100%"),
    color("card-foreground", "Card Foreground", Surface, "222.2 84% 4.9%"),
    color("popover", "Popover", Surface, "0 0% 100%"),
    color(
        "popover-foreground",
        "Popover Foreground",
        Surface,
        "222.2 84% 4.9%",
    ),
    color("primary", "Primary", Brand, "222.2 47.4% 11.2%"),
    color("primary-foreground", "Primary Foreground", Brand, "210 40% 98%"),
    color("secondary", "Secondary", Brand, "210 40% 96.1%"),
    color(
        "secondary-foreground",
        "Secondary Foreground",
        Brand,
        "222.2 47.4% 11.2%",
    ),
    color("muted", "Muted", Surface, "210 40% 96.1%"),
    color(
        "muted-foreground",
        "Muted Foreground",
        Surface,
        "215.4 16.3% 46.9%",
    ),
    color("accent", "Accent", Brand, "210 40% 96.1%"),
    color(
        "accent-foreground",
        "Accent Foreground",
        Brand,
        "222.2 47.4% 11.2%",
    ),
    color("destructive", "Destructive", Feedback, "0 84.2% 60.2%"),
    color(
        "destructive-foreground",
        "Destructive Foreground",
        Feedback,
        "210 40% 98%",
    ),
    color("success", "Success", Feedback, "142.1 76.2% 36.3%"),
    color("warning", "Warning", Feedback, "38 92% 50%"),
    color("border", "Border", Base, "214.3 31.8% 91.4%"),
    color("input", "Input", Base, "214.3 31.8% 91.4%"),
    color("ring", "Focus Ring", Base, "222.2 84% 4.9%"),
    color("chart-1", "Chart 1", Chart, "12 76% 61%"),
    color("chart-2", "Chart 2", Chart, "173 58% 39%"),
    color("chart-3", "Chart 3", Chart, "197 37% 24%"),
    color("chart-4", "Chart 4", Chart, "43 74% 66%"),
    color("chart-5", "Chart 5", Chart, "27 87% 67%"),
    color("sidebar-background", "Sidebar Background", Sidebar, "0 0% 98%"),
    color(
        "sidebar-foreground",
        "Sidebar Foreground",
        Sidebar,
        "240 5.3% 26.1%",
    ),
    color("sidebar-primary", "Sidebar Primary", Sidebar, "240 5.9% 10%"),
    color(
        "sidebar-primary-foreground",
        "Sidebar Primary Foreground",
        Sidebar,
        "0 0% 98%",
    ),
    color("sidebar-accent", "Sidebar Accent", Sidebar, "240 4.8% 95.9%"),
    color(
        "sidebar-accent-foreground",
        "Sidebar Accent Foreground",
        Sidebar,
        "240 5.9% 10%",
    ),
    color("sidebar-border", "Sidebar Border", Sidebar, "220 13% 91%"),
    color("sidebar-ring", "Sidebar Ring", Sidebar, "217.2 91.2% 59.8%"),
    color("header-background", "Header Background", Layout, "0 0% 100%"),
    color("gradient-from", "Gradient Start", Layout, "222.2 47.4% 11.2%"),
    color("gradient-to", "Gradient End", Layout, "217.2 91.2% 59.8%"),
    color("link", "Link", Brand, "221.2 83.2% 53.3%"),
    ThemeVariable {
        key: "radius",
        label: "Border Radius",
        kind: VariableKind::Length,
        group: Layout,
        default: "0.5rem",
    },
];

/// All catalog tokens in display order.
pub fn catalog() -> &'static [ThemeVariable] {
    &CATALOG
}

pub fn variable(key: &str) -> Option<&'static ThemeVariable> {
    CATALOG.iter().find(|variable| variable.key == key)
}

/// Palette made of every token's catalog default.
pub fn default_palette() -> ThemePalette {
    CATALOG
        .iter()
        .map(|variable| (variable.key, variable.default))
        .collect()
}
