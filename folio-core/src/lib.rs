//! # Folio Core
//!
//! Domain and persistence layer for the Folio site theme service.
//!
//! ## Overview
//!
//! - **Theme catalog**: the style tokens a theme sets, with defaults and labels
//! - **Palette registry**: the closed set of built-in themes and their palettes
//! - **Settings store**: reads and writes the site-wide active theme, repairing
//!   missing or corrupt records on read
//! - **Preview plans**: the ordered style operations that repaint a document
//!   root when a theme is selected
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL adapter and migrations (SQLx)
//! - `postgres-tests`: adapter tests that need a live database
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use folio_core::application::{AppUnitOfWork, ThemeEventBus, ThemeSettingsStore};
//!
//! async fn switch_theme() -> Result<(), folio_core::domain::theme::ThemeError> {
//!     let (uow, _repo) = AppUnitOfWork::in_memory();
//!     let store = ThemeSettingsStore::new(&uow, Arc::new(ThemeEventBus::default()), "site-theme");
//!     let active = store.set_active_theme("ocean-depth").await?;
//!     println!("{} has {} tokens", active.name, active.palette.len());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Route constants and API facade
pub mod api;

/// Transport DTOs shared by the server and its clients
pub mod api_types;

/// Application services
pub mod application;

/// Repository ports and storage adapters
pub mod database;

/// Theme domain model
pub mod domain;

/// Error types and error handling utilities
pub mod error;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{Result, SiteError};
