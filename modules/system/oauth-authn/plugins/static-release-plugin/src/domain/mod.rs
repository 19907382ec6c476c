//! Domain layer for the static attribute release plugin.

pub mod client;
pub mod service;

pub use service::AttributeReleaser;
