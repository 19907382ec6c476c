//! Client implementation for the static attribute release plugin.
//!
//! Implements `PrincipalAttributeFilter` using the domain service.

use oauth_authn_sdk::{
    AttributeReleaseError, Principal, PrincipalAttributeFilter, RegisteredService, RequestContext,
    Service,
};
use tracing::debug;

use super::service::AttributeReleaser;

impl PrincipalAttributeFilter for AttributeReleaser {
    fn filter(
        &self,
        service: &Service,
        principal: Principal,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
    ) -> Result<Principal, AttributeReleaseError> {
        let released = self.release(&principal, registered_service, context);
        debug!(
            service = %service,
            mode = ?self.mode(),
            candidate = principal.attributes().len(),
            released = released.attributes().len(),
            "Applied attribute release policy"
        );
        Ok(released)
    }
}
