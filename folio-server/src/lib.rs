//! HTTP surface of the Folio site: the theme catalog, the active theme
//! setting, live theme change events and the generated site stylesheet.
//!
//! The binary in `main.rs` wires configuration and storage, then serves the
//! router built by [`app::create_app`].

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
