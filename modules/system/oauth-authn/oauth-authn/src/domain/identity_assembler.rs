//! Assembly of the internal authentication from a verified external profile.

use std::sync::Arc;

use chrono::Utc;
use oauth_authn_sdk::constants::{NONCE, PERMISSIONS, PROTOCOL_ATTRIBUTES, ROLES, STATE};
use oauth_authn_sdk::{
    AttributeValue, Authentication, CredentialMetaData, ExternalProfile, HandlerResult, Principal,
    PrincipalAttributeFilter, RegisteredService, RequestContext, Service,
};
use tracing::debug;

use super::error::DomainError;
use crate::config::OAuthAuthnConfig;

/// Builds [`Authentication`] records.
///
/// Attributes live in two tiers: the principal carries what the release
/// policy approved; the authentication additionally carries protocol
/// attributes and, when enabled, raw profile attributes the principal did not
/// claim. Raw attributes never replace principal or protocol attributes.
pub struct IdentityAssembler {
    filter: Arc<dyn PrincipalAttributeFilter>,
    release_protocol_attributes: bool,
}

impl IdentityAssembler {
    #[must_use]
    pub fn new(filter: Arc<dyn PrincipalAttributeFilter>, release_protocol_attributes: bool) -> Self {
        Self {
            filter,
            release_protocol_attributes,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &OAuthAuthnConfig, filter: Arc<dyn PrincipalAttributeFilter>) -> Self {
        Self::new(filter, cfg.release_protocol_attributes)
    }

    /// Assemble the authentication for `profile` authenticating to `service`.
    ///
    /// # Errors
    ///
    /// - `AttributeRelease` if the release policy fails; the policy error is kept as the source
    /// - `BlankPrincipal` if the policy returns a principal without identifier
    #[tracing::instrument(
        skip_all,
        fields(client_id = %registered_service.client_id(), service = %service)
    )]
    pub fn build(
        &self,
        profile: &ExternalProfile,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        service: &Service,
    ) -> Result<Authentication, DomainError> {
        let candidate = Principal::new(profile.id(), profile.attributes().clone());
        let principal = self
            .filter
            .filter(service, candidate, registered_service, context)
            .map_err(|source| DomainError::AttributeRelease {
                service: service.id().to_owned(),
                source,
            })?;
        if principal.id().trim().is_empty() {
            return Err(DomainError::BlankPrincipal {
                service: service.id().to_owned(),
            });
        }
        debug!(
            principal = %principal.id(),
            released = principal.attributes().len(),
            registered_service = %registered_service,
            "Created final principal after filtering attributes"
        );

        let authenticator = profile.authenticator();
        let credential = CredentialMetaData::new(profile.id());
        let handler_result =
            HandlerResult::new(authenticator, credential.clone(), principal.clone(), Vec::new());

        let state = parameter_or_empty(context, STATE);
        let nonce = parameter_or_empty(context, NONCE);
        debug!(
            has_state = !state.is_empty(),
            has_nonce = !nonce.is_empty(),
            "Captured OAuth protocol parameters"
        );

        let mut builder = Authentication::builder(principal, Utc::now())
            .add_attribute(PERMISSIONS, AttributeValue::Multi(profile.permissions().to_vec()))
            .add_attribute(ROLES, AttributeValue::Multi(profile.roles().to_vec()))
            .add_attribute(STATE, state)
            .add_attribute(NONCE, nonce)
            .add_credential(credential)
            .add_success(authenticator, handler_result);

        if self.releases_protocol_attributes(registered_service) {
            for (name, value) in profile.attributes() {
                if builder.principal().attributes().contains_key(name) {
                    debug!(attribute = %name, "Skipped attribute already contained by the principal");
                } else if PROTOCOL_ATTRIBUTES.contains(&name.as_str()) {
                    // Seeded from the request and the raw roles/permissions above.
                    debug!(attribute = %name, "Skipped attribute shadowing a protocol attribute");
                } else {
                    debug!(attribute = %name, "Added profile attribute to the authentication");
                    builder = builder.add_attribute(name.as_str(), value.clone());
                }
            }
        }

        Ok(builder.build())
    }

    fn releases_protocol_attributes(&self, registered_service: &RegisteredService) -> bool {
        registered_service
            .release_protocol_attributes()
            .unwrap_or(self.release_protocol_attributes)
    }
}

fn parameter_or_empty(context: &dyn RequestContext, name: &str) -> String {
    context
        .request_parameter(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_default()
        .to_owned()
}
