use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of themes the site can switch between.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Default,
    OceanDepth,
    ForestGreen,
    SunsetGlow,
    CyberPunk,
    MidnightGradient,
    RoseGarden,
    ArcticFrost,
}

impl ThemeName {
    pub const ALL: [ThemeName; 8] = [
        ThemeName::Default,
        ThemeName::OceanDepth,
        ThemeName::ForestGreen,
        ThemeName::SunsetGlow,
        ThemeName::CyberPunk,
        ThemeName::MidnightGradient,
        ThemeName::RoseGarden,
        ThemeName::ArcticFrost,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::OceanDepth => "ocean-depth",
            ThemeName::ForestGreen => "forest-green",
            ThemeName::SunsetGlow => "sunset-glow",
            ThemeName::CyberPunk => "cyber-punk",
            ThemeName::MidnightGradient => "midnight-gradient",
            ThemeName::RoseGarden => "rose-garden",
            ThemeName::ArcticFrost => "arctic-frost",
        }
    }

    pub const fn is_default(self) -> bool {
        matches!(self, ThemeName::Default)
    }

    /// Class placed on the document root while this theme is previewed.
    pub fn marker_class(self) -> String {
        format!("theme-{}", self.as_str())
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeName {
    input: String,
}

impl UnknownThemeName {
    pub fn new(value: &str) -> Self {
        Self {
            input: value.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for UnknownThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid theme; expected one of: {}",
            self.input,
            ThemeName::ALL
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownThemeName {}

impl FromStr for ThemeName {
    type Err = UnknownThemeName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| UnknownThemeName::new(value))
    }
}

impl TryFrom<&str> for ThemeName {
    type Error = UnknownThemeName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ThemeName::from_str(value)
    }
}
