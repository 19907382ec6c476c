//! Public API trait for the `OAuth` authentication module.
//!
//! Consumers (the `OAuth` callback and token endpoints) use this trait to turn
//! a verified external profile into an internal authentication.

use crate::authentication::Authentication;
use crate::context::RequestContext;
use crate::error::OAuthAuthnError;
use crate::models::{ExternalProfile, RegisteredService, Service};

/// Public API trait for the `OAuth` authentication module.
///
/// ```ignore
/// let service = authn.resolve_service(&registered, &ctx, false);
/// let authentication = authn.build_authentication(&profile, &registered, &ctx, &service)?;
/// ```
///
/// # Security
///
/// Only enable `allow_header_override` for callers that need a client to
/// declare its logical service: header values are caller controlled.
pub trait OAuthAuthnClient: Send + Sync {
    /// Resolve the service the client is authenticating against.
    ///
    /// Never fails; falls back to the registered client identifier.
    fn resolve_service(
        &self,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        allow_header_override: bool,
    ) -> Service;

    /// Assemble the authentication for a verified external profile.
    ///
    /// # Errors
    ///
    /// - `AttributeRelease` if the release policy fails
    /// - `Internal` for unexpected errors
    fn build_authentication(
        &self,
        profile: &ExternalProfile,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        service: &Service,
    ) -> Result<Authentication, OAuthAuthnError>;
}
