//! `OAuth` authentication module.

use std::sync::{Arc, OnceLock};

use oauth_authn_sdk::{OAuthAuthnClient, PrincipalAttributeFilter};
use tracing::info;

use crate::config::OAuthAuthnConfig;
use crate::domain::{IdentityAssembler, OAuthAuthnLocalClient, ServiceResolver};

/// `OAuth` authentication module.
///
/// Wires the configuration and the selected release policy into an
/// [`OAuthAuthnClient`]. Initialization happens once; later calls fail.
#[derive(Default)]
pub struct OAuthAuthn {
    client: OnceLock<Arc<dyn OAuthAuthnClient>>,
}

impl OAuthAuthn {
    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the module was already
    /// initialized.
    #[tracing::instrument(skip_all, fields(release_protocol_attributes = cfg.release_protocol_attributes))]
    pub fn init(
        &self,
        cfg: &OAuthAuthnConfig,
        filter: Arc<dyn PrincipalAttributeFilter>,
    ) -> anyhow::Result<Arc<dyn OAuthAuthnClient>> {
        cfg.validate()?;
        info!(
            service_header = %cfg.service_header,
            service_header_alias = %cfg.service_header_alias,
            "Initializing oauth_authn"
        );

        let resolver = ServiceResolver::from_config(cfg);
        let assembler = IdentityAssembler::from_config(cfg, filter);
        let client: Arc<dyn OAuthAuthnClient> =
            Arc::new(OAuthAuthnLocalClient::new(resolver, assembler));

        self.client
            .set(client.clone())
            .map_err(|_| anyhow::anyhow!("Client already initialized"))?;

        Ok(client)
    }

    /// The client, once [`Self::init`] has succeeded.
    #[must_use]
    pub fn client(&self) -> Option<Arc<dyn OAuthAuthnClient>> {
        self.client.get().cloned()
    }
}
