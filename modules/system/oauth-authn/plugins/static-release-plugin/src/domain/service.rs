//! Release policy evaluation for the static attribute release plugin.

use std::collections::{BTreeMap, BTreeSet};

use oauth_authn_sdk::constants::SCOPE;
use oauth_authn_sdk::{AttributeReleasePolicy, Attributes, Principal, RegisteredService, RequestContext};

use crate::config::{ReleaseMode, StaticReleasePluginConfig};

/// Static attribute release service.
///
/// Applies release rules based on configuration mode:
/// - `service_policy`: the registered service's policy decides
/// - `release_all`: every attribute is released
/// - `oidc_scopes`: the service policy, narrowed to the requested scopes' claims
pub struct AttributeReleaser {
    mode: ReleaseMode,
    scope_claims: BTreeMap<String, Vec<String>>,
}

impl AttributeReleaser {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticReleasePluginConfig) -> Self {
        Self {
            mode: cfg.mode,
            scope_claims: cfg.scope_claims.clone(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Filter `principal` for `registered_service`. The identifier is kept.
    #[must_use]
    pub fn release(
        &self,
        principal: &Principal,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
    ) -> Principal {
        let attributes = match self.mode {
            ReleaseMode::ReleaseAll => principal.attributes().clone(),
            ReleaseMode::ServicePolicy => {
                apply_policy(registered_service.release_policy(), principal.attributes())
            }
            ReleaseMode::OidcScopes => {
                let granted = self.granted_claims(context.request_parameter(SCOPE));
                apply_policy(registered_service.release_policy(), principal.attributes())
                    .into_iter()
                    .filter(|(name, _)| granted.contains(name.as_str()))
                    .collect()
            }
        };

        Principal::new(principal.id(), attributes)
    }

    fn granted_claims(&self, scope: Option<&str>) -> BTreeSet<&str> {
        scope
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|s| self.scope_claims.get(s))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

fn apply_policy(policy: &AttributeReleasePolicy, attributes: &Attributes) -> Attributes {
    match policy {
        AttributeReleasePolicy::DenyAll => Attributes::new(),
        AttributeReleasePolicy::ReturnAll => attributes.clone(),
        AttributeReleasePolicy::ReturnAllowed { allowed_attributes } => allowed_attributes
            .iter()
            .filter_map(|name| {
                attributes
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect(),
        AttributeReleasePolicy::ReturnMapped { mapping } => mapping
            .iter()
            .filter_map(|(source, target)| {
                attributes
                    .get(source)
                    .map(|value| (target.clone(), value.clone()))
            })
            .collect(),
    }
}
