pub mod catalog;
pub mod error;
pub mod name;
pub mod palette;
pub mod preview;
pub mod registry;
pub mod setting;
pub mod stylesheet;

pub use catalog::{ThemeVariable, VariableGroup, VariableKind};
pub use error::{THEME_FIELD, ThemeError};
pub use name::{ThemeName, UnknownThemeName};
pub use palette::ThemePalette;
pub use preview::{
    InlineRootStyle, PreviewPlan, StyleOp, StyleTarget, apply_preview,
};
pub use registry::{ThemeDescriptor, ThemeRegistry, ThemeSwatch};
pub use setting::{ActiveThemeSetting, SettingSource};
pub use stylesheet::render_stylesheet;
