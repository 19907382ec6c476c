#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Attribute Release Plugin
//!
//! Decides which external profile attributes reach the principal.
//!
//! ## Modes
//!
//! - **`service_policy`** (default): Applies the registered service's own
//!   release policy (deny-all, return-all, allow-list, or rename map).
//!
//! - **`release_all`**: Releases every attribute to every service. Development only.
//!
//! - **`oidc_scopes`**: Applies the service policy, then keeps only the claims
//!   granted by the request's `scope` parameter.
//!
//! ## Configuration
//!
//! ```yaml
//! modules:
//!   static_release_plugin:
//!     config:
//!       mode: oidc_scopes
//!       scope_claims:
//!         email: ["email", "email_verified"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use domain::AttributeReleaser;
pub use module::StaticReleasePlugin;
