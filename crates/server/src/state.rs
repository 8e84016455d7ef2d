use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reelview_core::{CatalogConfig, Config, SanitizedConfig, Upstream};

/// Shared application state
pub struct AppState {
    config: Config,
    upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: Config, upstream: Arc<dyn Upstream>) -> Self {
        Self { config, upstream }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn upstream(&self) -> Arc<dyn Upstream> {
        Arc::clone(&self.upstream)
    }

    pub fn catalog_config(&self) -> &CatalogConfig {
        &self.config.catalog
    }

    /// Freshness window advertised to browsers on relayed responses.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.config.tmdb.cache_ttl_secs)
    }

    pub fn image_base_url(&self) -> &str {
        &self.config.tmdb.image_base_url
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.config.server.static_dir.as_deref()
    }
}
