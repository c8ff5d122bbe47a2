//! DTOs exchanged across service boundaries.

pub mod responses;
pub mod theme;

pub use responses::ApiResponse;
pub use theme::{
    ActiveThemeResponse, ThemeListResponse, ThemeVariableDto,
    ThemeVariablesResponse, UpdateThemeRequest,
};
