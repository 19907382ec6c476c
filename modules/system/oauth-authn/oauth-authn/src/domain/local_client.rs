//! Local (in-process) client for the `OAuth` authentication module.

use oauth_authn_sdk::{
    Authentication, ExternalProfile, OAuthAuthnClient, OAuthAuthnError, RegisteredService,
    RequestContext, Service,
};

use super::{DomainError, IdentityAssembler, ServiceResolver};

/// Local client composing the resolver and the assembler.
///
/// Handed out by [`OAuthAuthn::init`](crate::module::OAuthAuthn::init).
pub struct OAuthAuthnLocalClient {
    resolver: ServiceResolver,
    assembler: IdentityAssembler,
}

impl OAuthAuthnLocalClient {
    #[must_use]
    pub fn new(resolver: ServiceResolver, assembler: IdentityAssembler) -> Self {
        Self {
            resolver,
            assembler,
        }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> OAuthAuthnError {
    tracing::error!(operation = op, error = ?e, "oauth_authn call failed");
    e.into()
}

impl OAuthAuthnClient for OAuthAuthnLocalClient {
    fn resolve_service(
        &self,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        allow_header_override: bool,
    ) -> Service {
        self.resolver
            .resolve(registered_service, context, allow_header_override)
    }

    fn build_authentication(
        &self,
        profile: &ExternalProfile,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        service: &Service,
    ) -> Result<Authentication, OAuthAuthnError> {
        self.assembler
            .build(profile, registered_service, context, service)
            .map_err(|e| log_and_convert("build_authentication", e))
    }
}
