//! `OAuth` Authentication Module
//!
//! Turns a verified external `OAuth`/OIDC profile into the internal
//! authentication consumed by session and ticket issuance:
//!
//! 1. [`ServiceResolver`](domain::ServiceResolver) picks the service identifier
//!    (optional `service` / `X-service` header override, registered client id otherwise).
//! 2. [`IdentityAssembler`](domain::IdentityAssembler) filters the profile through the
//!    configured release policy and builds the [`Authentication`](oauth_authn_sdk::Authentication).
//!
//! Provides the `OAuthAuthnClient` trait implementation for consumption by the
//! `OAuth` endpoints.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::OAuthAuthnConfig;
pub use module::OAuthAuthn;
