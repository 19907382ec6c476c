//! Static attribute release plugin module.

use std::sync::{Arc, OnceLock};

use oauth_authn_sdk::PrincipalAttributeFilter;
use tracing::info;

use crate::config::{ReleaseMode, StaticReleasePluginConfig};
use crate::domain::AttributeReleaser;

/// Static attribute release plugin module.
///
/// Builds the release service from configuration and hands it out as the
/// filter the `oauth_authn` module calls.
#[derive(Default)]
pub struct StaticReleasePlugin {
    service: OnceLock<Arc<AttributeReleaser>>,
}

impl StaticReleasePlugin {
    /// Build the filter.
    ///
    /// # Errors
    ///
    /// Fails if the plugin was already initialized.
    pub fn init(
        &self,
        cfg: &StaticReleasePluginConfig,
    ) -> anyhow::Result<Arc<dyn PrincipalAttributeFilter>> {
        info!("Initializing static_release_plugin");

        if cfg.mode == ReleaseMode::ReleaseAll {
            tracing::warn!(
                "Static release plugin is running in `release_all` mode: \
                 every profile attribute is released to every service. \
                 Do NOT use this mode in production."
            );
        }

        info!(
            mode = ?cfg.mode,
            scope_count = cfg.scope_claims.len(),
            "Loaded plugin configuration"
        );

        let service = Arc::new(AttributeReleaser::from_config(cfg));
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        info!("Static release plugin initialized");
        let filter: Arc<dyn PrincipalAttributeFilter> = service;
        Ok(filter)
    }
}
