//! Error types for the `OAuth` authentication module.

use thiserror::Error;

/// Errors that can occur when using the `OAuth` authentication API.
#[derive(Debug, Error)]
pub enum OAuthAuthnError {
    /// The external profile is missing data required to build an identity.
    #[error("invalid external profile: {0}")]
    InvalidProfile(String),

    /// The registered service record is unusable.
    #[error("invalid registered service: {0}")]
    InvalidRegisteredService(String),

    /// The attribute release policy rejected or failed to filter the principal.
    #[error("attribute release failed: {0}")]
    AttributeRelease(#[from] AttributeReleaseError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised by a [`PrincipalAttributeFilter`](crate::PrincipalAttributeFilter).
#[derive(Debug, Error)]
pub enum AttributeReleaseError {
    /// The policy refuses to release an identity to this service.
    #[error("release denied for service '{service}': {reason}")]
    Denied { service: String, reason: String },

    /// The policy engine could not be reached or is not ready.
    #[error("policy unavailable: {0}")]
    Unavailable(String),

    /// An internal error occurred while evaluating the policy.
    #[error("internal error: {0}")]
    Internal(String),
}
