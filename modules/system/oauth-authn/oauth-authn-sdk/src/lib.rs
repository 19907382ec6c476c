//! `OAuth` Authentication SDK
//!
//! This crate provides the public API for the `oauth_authn` module:
//!
//! - [`OAuthAuthnClient`] - Public API trait for consumers
//! - [`PrincipalAttributeFilter`] - Plugin API trait for release policies
//! - [`ExternalProfile`], [`RegisteredService`], [`Service`] - Inputs
//! - [`Principal`], [`Authentication`] - Outputs
//! - [`RequestContext`] - Header and parameter lookup
//! - [`OAuthAuthnError`], [`AttributeReleaseError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use oauth_authn_sdk::{HttpRequestContext, OAuthAuthnClient};
//!
//! let ctx = HttpRequestContext::from_parts(&parts);
//! let service = authn.resolve_service(&registered, &ctx, false);
//! let authentication = authn.build_authentication(&profile, &registered, &ctx, &service)?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod authentication;
pub mod constants;
pub mod context;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::OAuthAuthnClient;
pub use authentication::{
    Authentication, AuthenticationBuilder, CredentialMetaData, HandlerResult, Principal,
};
pub use context::{HttpRequestContext, RequestContext};
pub use error::{AttributeReleaseError, OAuthAuthnError};
pub use models::{
    AttributeReleasePolicy, AttributeValue, Attributes, ExternalProfile, ExternalProfileBuilder,
    RegisteredService, Service,
};
pub use plugin_api::PrincipalAttributeFilter;
