//! Configuration for the `OAuth` authentication module.

use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use oauth_authn_sdk::constants::{SERVICE_HEADER, SERVICE_HEADER_ALIAS};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "OAUTH_AUTHN_";

/// Keys read from the environment; other `OAUTH_AUTHN_*` variables are ignored.
const ENV_KEYS: [&str; 3] = [
    "release_protocol_attributes",
    "service_header",
    "service_header_alias",
];

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OAuthAuthnConfig {
    /// Copy raw profile attributes that the release policy did not put on the
    /// principal onto the authentication record. A registered service may
    /// override this.
    pub release_protocol_attributes: bool,

    /// Header a client may use to declare its logical service.
    pub service_header: String,

    /// Alias checked when [`Self::service_header`] is absent or blank.
    pub service_header_alias: String,
}

impl Default for OAuthAuthnConfig {
    fn default() -> Self {
        Self {
            release_protocol_attributes: true,
            service_header: SERVICE_HEADER.to_owned(),
            service_header_alias: SERVICE_HEADER_ALIAS.to_owned(),
        }
    }
}

impl OAuthAuthnConfig {
    /// Load defaults, then the optional YAML file, then `OAUTH_AUTHN_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or malformed, if a value has the wrong type,
    /// or if a header name is blank.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "configuration file {} does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }

        let cfg: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
            .extract()
            .context("invalid oauth_authn configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Fails if a header name is blank.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.service_header.trim().is_empty(),
            "service_header must not be blank"
        );
        anyhow::ensure!(
            !self.service_header_alias.trim().is_empty(),
            "service_header_alias must not be blank"
        );
        Ok(())
    }
}
