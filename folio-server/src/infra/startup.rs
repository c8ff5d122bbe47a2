use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::infra::app_state::AppState;

#[async_trait]
pub trait StartupHooks: Send + Sync {
    async fn run(&self, state: &AppState) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct ProdStartupHooks;

#[async_trait]
impl StartupHooks for ProdStartupHooks {
    async fn run(&self, state: &AppState) -> Result<()> {
        if let Err(err) = state.theme_store().storage_health().await {
            warn!(error = %err, "Theme settings storage is not responding");
        }

        // First read creates the default record when none exists.
        let active = state.theme_store().get_active_theme().await;
        info!(
            settings_key = %state.theme_store().settings_key(),
            theme = %active.name,
            source = ?active.source,
            "Active theme resolved"
        );

        Ok(())
    }
}
