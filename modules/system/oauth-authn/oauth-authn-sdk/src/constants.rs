//! Well-known header, parameter, and attribute names.

/// Request header a client may use to declare the service it represents.
pub const SERVICE_HEADER: &str = "service";

/// Namespaced alias of [`SERVICE_HEADER`].
pub const SERVICE_HEADER_ALIAS: &str = "X-service";

/// OAuth `state` request parameter and authentication attribute.
pub const STATE: &str = "state";

/// OIDC `nonce` request parameter and authentication attribute.
pub const NONCE: &str = "nonce";

/// OAuth `scope` request parameter (space-separated).
pub const SCOPE: &str = "scope";

/// Authentication attribute carrying the raw profile permissions.
pub const PERMISSIONS: &str = "permissions";

/// Authentication attribute carrying the raw profile roles.
pub const ROLES: &str = "roles";

/// Attributes seeded on every authentication regardless of release policy.
pub const PROTOCOL_ATTRIBUTES: [&str; 4] = [PERMISSIONS, ROLES, STATE, NONCE];
