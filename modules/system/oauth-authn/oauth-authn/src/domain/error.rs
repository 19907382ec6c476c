//! Domain errors for the `OAuth` authentication module.

use oauth_authn_sdk::{AttributeReleaseError, OAuthAuthnError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("attribute release failed for service '{service}': {source}")]
    AttributeRelease {
        service: String,
        #[source]
        source: AttributeReleaseError,
    },

    #[error("release policy returned a principal without identifier for service '{service}'")]
    BlankPrincipal { service: String },
}

impl From<DomainError> for OAuthAuthnError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::AttributeRelease { source, .. } => Self::AttributeRelease(source),
            e @ DomainError::BlankPrincipal { .. } => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn attribute_release_error_passes_through_unchanged() {
        let domain = DomainError::AttributeRelease {
            service: "https://app.example.org".to_owned(),
            source: AttributeReleaseError::Unavailable("policy store down".to_owned()),
        };

        match OAuthAuthnError::from(domain) {
            OAuthAuthnError::AttributeRelease(AttributeReleaseError::Unavailable(msg)) => {
                assert_eq!(msg, "policy store down");
            }
            other => panic!("Expected AttributeRelease, got: {other:?}"),
        }
    }

    #[test]
    fn blank_principal_maps_to_internal() {
        let domain = DomainError::BlankPrincipal {
            service: "svc".to_owned(),
        };
        assert!(matches!(
            OAuthAuthnError::from(domain),
            OAuthAuthnError::Internal(_)
        ));
    }
}
