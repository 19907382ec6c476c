//! Domain layer for the `OAuth` authentication module.

pub mod error;
pub mod identity_assembler;
pub mod local_client;
pub mod service_resolver;

pub use error::DomainError;
pub use identity_assembler::IdentityAssembler;
pub use local_client::OAuthAuthnLocalClient;
pub use service_resolver::ServiceResolver;
