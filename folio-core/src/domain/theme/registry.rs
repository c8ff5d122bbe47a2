//! Built-in palettes for every [`ThemeName`].
//!
//! Each non-default theme is written down as a compact set of core colours;
//! the remaining catalog tokens are derived from those so that every palette
//! covers the whole catalog. The `default` theme is the catalog defaults.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::catalog;
use super::name::ThemeName;
use super::palette::ThemePalette;

/// Four colours shown on a selector card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSwatch {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub name: ThemeName,
    pub label: &'static str,
    pub description: &'static str,
    pub swatch: ThemeSwatch,
}

struct CoreColors {
    background: &'static str,
    foreground: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    secondary_foreground: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    accent_foreground: &'static str,
    destructive: &'static str,
    border: &'static str,
    ring: &'static str,
    gradient_from: &'static str,
    gradient_to: &'static str,
    radius: &'static str,
}

impl CoreColors {
    fn expand(&self) -> ThemePalette {
        // Start from the defaults so tokens without a derivation rule
        // (success, warning) keep their catalog values.
        let mut palette = catalog::default_palette();
        let entries = [
            ("background", self.background),
            ("foreground", self.foreground),
            ("card", self.background),
            ("card-foreground", self.foreground),
            ("popover", self.background),
            ("popover-foreground", self.foreground),
            ("primary", self.primary),
            ("primary-foreground", self.primary_foreground),
            ("secondary", self.secondary),
            ("secondary-foreground", self.secondary_foreground),
            ("muted", self.muted),
            ("muted-foreground", self.muted_foreground),
            ("accent", self.accent),
            ("accent-foreground", self.accent_foreground),
            ("destructive", self.destructive),
            ("destructive-foreground", "0 0% 98%"),
            ("border", self.border),
            ("input", self.border),
            ("ring", self.ring),
            ("chart-1", self.primary),
            ("chart-2", self.accent),
            ("chart-3", self.gradient_to),
            ("chart-4", self.secondary),
            ("chart-5", self.destructive),
            ("sidebar-background", self.muted),
            ("sidebar-foreground", self.foreground),
            ("sidebar-primary", self.primary),
            ("sidebar-primary-foreground", self.primary_foreground),
            ("sidebar-accent", self.accent),
            ("sidebar-accent-foreground", self.accent_foreground),
            ("sidebar-border", self.border),
            ("sidebar-ring", self.ring),
            ("header-background", self.background),
            ("gradient-from", self.gradient_from),
            ("gradient-to", self.gradient_to),
            ("link", self.primary),
            ("radius", self.radius),
        ];
        for (key, value) in entries {
            palette.insert(key, value);
        }
        palette
    }
}

struct ThemeDefinition {
    name: ThemeName,
    label: &'static str,
    description: &'static str,
    colors: Option<CoreColors>,
}

const DEFINITIONS: [ThemeDefinition; 8] = [
    ThemeDefinition {
        name: ThemeName::Default,
        label: "Default",
        description: "Clean light theme with neutral slate accents",
        colors: None,
    },
    ThemeDefinition {
        name: ThemeName::OceanDepth,
        label: "Ocean Depth",
        description: "Deep navy surfaces with bright cyan highlights",
        colors: Some(CoreColors {
            background: "210 50% 8%",
            foreground: "195 40% 92%",
            primary: "199 89% 48%",
            primary_foreground: "210 50% 8%",
            secondary: "205 45% 18%",
            secondary_foreground: "195 40% 92%",
            muted: "207 40% 14%",
            muted_foreground: "200 20% 65%",
            accent: "174 72% 40%",
            accent_foreground: "210 50% 8%",
            destructive: "0 72% 51%",
            border: "205 35% 22%",
            ring: "199 89% 48%",
            gradient_from: "210 80% 20%",
            gradient_to: "187 85% 43%",
            radius: "0.75rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::ForestGreen,
        label: "Forest Green",
        description: "Warm parchment with deep evergreen and amber tones",
        colors: Some(CoreColors {
            background: "40 30% 97%",
            foreground: "150 30% 12%",
            primary: "142 64% 28%",
            primary_foreground: "60 30% 96%",
            secondary: "90 25% 88%",
            secondary_foreground: "150 30% 15%",
            muted: "80 20% 92%",
            muted_foreground: "150 10% 40%",
            accent: "35 70% 50%",
            accent_foreground: "150 30% 10%",
            destructive: "0 70% 45%",
            border: "90 15% 82%",
            ring: "142 64% 28%",
            gradient_from: "142 64% 24%",
            gradient_to: "84 60% 40%",
            radius: "0.5rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::SunsetGlow,
        label: "Sunset Glow",
        description: "Soft peach background with coral and magenta accents",
        colors: Some(CoreColors {
            background: "30 100% 98%",
            foreground: "20 40% 15%",
            primary: "16 90% 55%",
            primary_foreground: "0 0% 100%",
            secondary: "35 90% 90%",
            secondary_foreground: "20 40% 20%",
            muted: "30 60% 94%",
            muted_foreground: "20 15% 45%",
            accent: "340 80% 60%",
            accent_foreground: "0 0% 100%",
            destructive: "0 80% 50%",
            border: "30 50% 85%",
            ring: "16 90% 55%",
            gradient_from: "16 90% 55%",
            gradient_to: "340 80% 60%",
            radius: "1rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::CyberPunk,
        label: "Cyber Punk",
        description: "Near-black violet with neon magenta and cyan",
        colors: Some(CoreColors {
            background: "260 40% 6%",
            foreground: "180 100% 90%",
            primary: "320 100% 55%",
            primary_foreground: "260 40% 6%",
            secondary: "260 35% 16%",
            secondary_foreground: "180 100% 85%",
            muted: "260 30% 12%",
            muted_foreground: "250 20% 65%",
            accent: "180 100% 50%",
            accent_foreground: "260 40% 6%",
            destructive: "0 100% 60%",
            border: "290 60% 30%",
            ring: "180 100% 50%",
            gradient_from: "320 100% 55%",
            gradient_to: "180 100% 50%",
            radius: "0rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::MidnightGradient,
        label: "Midnight Gradient",
        description: "Dark indigo with a violet to purple gradient",
        colors: Some(CoreColors {
            background: "230 35% 7%",
            foreground: "220 30% 94%",
            primary: "250 85% 67%",
            primary_foreground: "0 0% 100%",
            secondary: "232 30% 16%",
            secondary_foreground: "220 30% 90%",
            muted: "232 25% 13%",
            muted_foreground: "225 15% 60%",
            accent: "280 70% 60%",
            accent_foreground: "0 0% 100%",
            destructive: "0 70% 55%",
            border: "232 25% 20%",
            ring: "250 85% 67%",
            gradient_from: "250 85% 35%",
            gradient_to: "280 70% 45%",
            radius: "0.75rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::RoseGarden,
        label: "Rose Garden",
        description: "Blush pink surfaces with rose and leaf green accents",
        colors: Some(CoreColors {
            background: "350 60% 98%",
            foreground: "340 30% 15%",
            primary: "346 77% 50%",
            primary_foreground: "355 100% 97%",
            secondary: "340 50% 92%",
            secondary_foreground: "340 30% 20%",
            muted: "345 40% 95%",
            muted_foreground: "340 12% 45%",
            accent: "140 30% 45%",
            accent_foreground: "0 0% 100%",
            destructive: "0 72% 45%",
            border: "345 35% 88%",
            ring: "346 77% 50%",
            gradient_from: "346 77% 50%",
            gradient_to: "20 80% 65%",
            radius: "0.65rem",
        }),
    },
    ThemeDefinition {
        name: ThemeName::ArcticFrost,
        label: "Arctic Frost",
        description: "Icy whites with crisp glacier blue",
        colors: Some(CoreColors {
            background: "200 30% 98%",
            foreground: "210 40% 12%",
            primary: "205 80% 45%",
            primary_foreground: "0 0% 100%",
            secondary: "200 40% 92%",
            secondary_foreground: "210 40% 15%",
            muted: "200 30% 95%",
            muted_foreground: "210 15% 45%",
            accent: "190 60% 85%",
            accent_foreground: "210 40% 12%",
            destructive: "0 75% 50%",
            border: "200 25% 87%",
            ring: "205 80% 45%",
            gradient_from: "205 80% 85%",
            gradient_to: "190 60% 95%",
            radius: "0.375rem",
        }),
    },
];

static BUILTIN: Lazy<Arc<ThemeRegistry>> = Lazy::new(|| {
    let palettes = DEFINITIONS
        .iter()
        .map(|definition| {
            let palette = match &definition.colors {
                Some(colors) => colors.expand(),
                None => catalog::default_palette(),
            };
            (definition.name, palette)
        })
        .collect();
    Arc::new(ThemeRegistry::new(palettes))
});

/// Lookup table from theme name to its complete palette.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    palettes: HashMap<ThemeName, ThemePalette>,
}

impl ThemeRegistry {
    /// Shared registry holding the built-in palettes.
    pub fn builtin() -> Arc<ThemeRegistry> {
        Arc::clone(&BUILTIN)
    }

    pub fn new(palettes: HashMap<ThemeName, ThemePalette>) -> Self {
        Self { palettes }
    }

    pub fn palette_for(&self, name: ThemeName) -> Option<&ThemePalette> {
        self.palettes.get(&name)
    }

    pub fn descriptors(&self) -> Vec<ThemeDescriptor> {
        DEFINITIONS
            .iter()
            .map(|definition| {
                let palette = self.palette_for(definition.name);
                let pick = |key: &str| {
                    palette
                        .and_then(|palette| palette.get(key))
                        .or_else(|| catalog::variable(key).map(|v| v.default))
                        .unwrap_or_default()
                        .to_string()
                };
                ThemeDescriptor {
                    name: definition.name,
                    label: definition.label,
                    description: definition.description,
                    swatch: ThemeSwatch {
                        background: pick("background"),
                        foreground: pick("foreground"),
                        primary: pick("primary"),
                        accent: pick("accent"),
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_palette_is_complete() {
        let registry = ThemeRegistry::builtin();
        for name in ThemeName::ALL {
            let palette = registry
                .palette_for(name)
                .unwrap_or_else(|| panic!("palette for {name}"));
            assert!(
                palette.is_complete(),
                "{name} is missing {:?}",
                palette.missing_keys()
            );
        }
    }

    #[test]
    fn default_palette_matches_catalog_defaults() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(
            registry.palette_for(ThemeName::Default),
            Some(&catalog::default_palette())
        );
    }

    #[test]
    fn derived_tokens_follow_core_colours() {
        let registry = ThemeRegistry::builtin();
        let palette = registry
            .palette_for(ThemeName::OceanDepth)
            .expect("ocean palette");
        assert_eq!(palette.get("card"), palette.get("background"));
        assert_eq!(palette.get("input"), palette.get("border"));
        assert_eq!(palette.get("sidebar-primary"), Some("199 89% 48%"));
        assert_eq!(palette.get("radius"), Some("0.75rem"));
        assert_eq!(palette.get("success"), Some("142.1 76.2% 36.3%"));
    }

    #[test]
    fn palettes_are_distinct() {
        let registry = ThemeRegistry::builtin();
        let primaries: std::collections::HashSet<_> = ThemeName::ALL
            .iter()
            .filter_map(|name| registry.palette_for(*name))
            .map(|palette| palette.get("primary"))
            .collect();
        assert_eq!(primaries.len(), ThemeName::ALL.len());
    }

    #[test]
    fn descriptors_cover_all_names_in_order() {
        let descriptors = ThemeRegistry::builtin().descriptors();
        let names: Vec<_> = descriptors.iter().map(|d| d.name).collect();
        assert_eq!(names, ThemeName::ALL.to_vec());
        let forest = &descriptors[2];
        assert_eq!(forest.label, "Forest Green");
        assert_eq!(forest.swatch.primary, "142 64% 28%");
    }
}
