//! Plugin API trait for attribute release policies.
//!
//! Plugins implement this trait to decide which profile attributes reach the
//! principal. The module holds one implementation, selected by configuration,
//! and calls it once per authentication.

use crate::authentication::Principal;
use crate::context::RequestContext;
use crate::error::AttributeReleaseError;
use crate::models::{RegisteredService, Service};

/// Attribute release policy engine.
///
/// Implementations return a principal whose attributes are chosen from the
/// candidate's attributes according to the registered service's policy
/// (allow-list, renaming, release-all and so on).
pub trait PrincipalAttributeFilter: Send + Sync {
    /// Filter the candidate principal for delivery to `service`.
    ///
    /// # Arguments
    ///
    /// * `service` - The resolved target service
    /// * `principal` - Candidate principal carrying the raw profile attributes
    /// * `registered_service` - Registration of the requesting client
    /// * `context` - The current request
    ///
    /// # Errors
    ///
    /// - `Denied` if the policy refuses to release the identity
    /// - `Unavailable` / `Internal` if the policy cannot be evaluated
    fn filter(
        &self,
        service: &Service,
        principal: Principal,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
    ) -> Result<Principal, AttributeReleaseError>;
}
