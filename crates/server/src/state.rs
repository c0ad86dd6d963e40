//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{Gateway, MySqlGateway};
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Store gateway; opens a connection per statement.
    gateway: Arc<dyn Gateway>,

    /// Theme engine for template rendering.
    theme: ThemeEngine,
}

impl AppState {
    /// Build state for the running server.
    ///
    /// An unreachable store is logged but does not abort startup; each
    /// request connects on its own.
    pub async fn new(config: &Config) -> Result<Self> {
        let theme = ThemeEngine::new(&config.templates_dir).with_context(|| {
            format!("failed to load templates from {}", config.templates_dir.display())
        })?;

        let gateway = Arc::new(MySqlGateway::new(config.store.clone()));
        let store = &config.store;
        if gateway.ping().await {
            info!(host = %store.host, database = %store.database, "store reachable");
        } else {
            warn!(host = %store.host, database = %store.database, "store not reachable at startup");
        }

        Ok(Self::from_parts(gateway, theme))
    }

    /// Assemble state from an explicit gateway and theme.
    pub fn from_parts(gateway: Arc<dyn Gateway>, theme: ThemeEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner { gateway, theme }),
        }
    }

    /// Get the store gateway.
    pub fn gateway(&self) -> &dyn Gateway {
        self.inner.gateway.as_ref()
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }
}
