//! Input models for the `OAuth` authentication module.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OAuthAuthnError;

/// A single- or multi-valued attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    /// All values, in order. A single value yields a one-element list.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(v) => vec![v.as_str()],
            Self::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl From<&[&str]> for AttributeValue {
    fn from(values: &[&str]) -> Self {
        Self::Multi(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// Attribute name to value(s).
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Identity obtained from an external `OAuth`/OIDC provider.
///
/// The identifier and the mechanism tag are never blank; the builder and
/// deserialization both reject such profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ExternalProfileRepr")]
pub struct ExternalProfile {
    id: String,
    /// Concrete mechanism that produced the profile (e.g. `GitHubProfile`).
    authenticator: String,
    attributes: Attributes,
    roles: Vec<String>,
    permissions: Vec<String>,
}

impl ExternalProfile {
    /// Start building a profile for the given identifier and mechanism tag.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        authenticator: impl Into<String>,
    ) -> ExternalProfileBuilder {
        ExternalProfileBuilder {
            id: id.into(),
            authenticator: authenticator.into(),
            attributes: Attributes::new(),
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn authenticator(&self) -> &str {
        &self.authenticator
    }

    /// Raw, unfiltered attributes as supplied by the provider.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }
}

pub struct ExternalProfileBuilder {
    id: String,
    authenticator: String,
    attributes: Attributes,
    roles: Vec<String>,
    permissions: Vec<String>,
}

impl ExternalProfileBuilder {
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Finish the profile.
    ///
    /// # Errors
    ///
    /// `InvalidProfile` if the identifier or the mechanism tag is blank.
    pub fn build(self) -> Result<ExternalProfile, OAuthAuthnError> {
        if self.id.trim().is_empty() {
            return Err(OAuthAuthnError::InvalidProfile(
                "profile identifier is blank".to_owned(),
            ));
        }
        if self.authenticator.trim().is_empty() {
            return Err(OAuthAuthnError::InvalidProfile(format!(
                "authentication mechanism is blank for profile '{}'",
                self.id
            )));
        }

        Ok(ExternalProfile {
            id: self.id,
            authenticator: self.authenticator,
            attributes: self.attributes,
            roles: self.roles,
            permissions: self.permissions,
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalProfileRepr {
    id: String,
    authenticator: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    permissions: Vec<String>,
}

impl TryFrom<ExternalProfileRepr> for ExternalProfile {
    type Error = OAuthAuthnError;

    fn try_from(repr: ExternalProfileRepr) -> Result<Self, Self::Error> {
        ExternalProfile::builder(repr.id, repr.authenticator)
            .attributes(repr.attributes)
            .roles(repr.roles)
            .permissions(repr.permissions)
            .build()
    }
}

/// Which profile attributes a registered service may receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeReleasePolicy {
    /// Release nothing but the identifier.
    #[default]
    DenyAll,
    /// Release every attribute.
    ReturnAll,
    /// Release only the listed attributes.
    ReturnAllowed { allowed_attributes: Vec<String> },
    /// Release the listed attributes under new names (source name to released name).
    ReturnMapped { mapping: BTreeMap<String, String> },
}

/// A client application registered with the SSO server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegisteredServiceRepr")]
pub struct RegisteredService {
    client_id: String,
    name: Option<String>,
    release_policy: AttributeReleasePolicy,
    /// Per-service override of the global raw-attribute passthrough flag.
    release_protocol_attributes: Option<bool>,
}

impl RegisteredService {
    /// Create a registration for `client_id`.
    ///
    /// # Errors
    ///
    /// `InvalidRegisteredService` if `client_id` is blank.
    pub fn new(
        client_id: impl Into<String>,
        release_policy: AttributeReleasePolicy,
    ) -> Result<Self, OAuthAuthnError> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(OAuthAuthnError::InvalidRegisteredService(
                "client identifier is blank".to_owned(),
            ));
        }

        Ok(Self {
            client_id,
            name: None,
            release_policy,
            release_protocol_attributes: None,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_release_protocol_attributes(mut self, release: bool) -> Self {
        self.release_protocol_attributes = Some(release);
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn release_policy(&self) -> &AttributeReleasePolicy {
        &self.release_policy
    }

    #[must_use]
    pub fn release_protocol_attributes(&self) -> Option<bool> {
        self.release_protocol_attributes
    }
}

impl fmt::Display for RegisteredService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.client_id),
            None => f.write_str(&self.client_id),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegisteredServiceRepr {
    client_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    release_policy: AttributeReleasePolicy,
    #[serde(default)]
    release_protocol_attributes: Option<bool>,
}

impl TryFrom<RegisteredServiceRepr> for RegisteredService {
    type Error = OAuthAuthnError;

    fn try_from(repr: RegisteredServiceRepr) -> Result<Self, Self::Error> {
        let mut svc = RegisteredService::new(repr.client_id, repr.release_policy)?;
        svc.name = repr.name;
        svc.release_protocol_attributes = repr.release_protocol_attributes;
        Ok(svc)
    }
}

/// The service (client application) a user is authenticating to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Service {
    id: String,
}

impl Service {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn profile_builder_rejects_blank_id() {
        let err = ExternalProfile::builder("  ", "GitHubProfile")
            .build()
            .unwrap_err();
        assert!(matches!(err, OAuthAuthnError::InvalidProfile(_)));
    }

    #[test]
    fn profile_builder_rejects_blank_authenticator() {
        let err = ExternalProfile::builder("casuser", "").build().unwrap_err();
        assert!(matches!(err, OAuthAuthnError::InvalidProfile(_)));
    }

    #[test]
    fn profile_deserialize_validates_id() {
        let res: Result<ExternalProfile, _> =
            serde_json::from_str(r#"{"id":"","authenticator":"GitHubProfile"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn profile_deserialize_accepts_single_and_multi_values() {
        let profile: ExternalProfile = serde_json::from_str(
            r#"{
                "id": "casuser",
                "authenticator": "GitHubProfile",
                "attributes": {"email": "a@x.com", "groups": ["admins", "staff"]},
                "roles": ["ROLE_USER"]
            }"#,
        )
        .unwrap();

        assert_eq!(profile.id(), "casuser");
        assert_eq!(
            profile.attributes().get("email"),
            Some(&AttributeValue::from("a@x.com"))
        );
        assert_eq!(
            profile.attributes().get("groups").map(AttributeValue::values),
            Some(vec!["admins", "staff"])
        );
        assert_eq!(profile.roles(), &["ROLE_USER"]);
        assert!(profile.permissions().is_empty());
    }

    #[test]
    fn registered_service_rejects_blank_client_id() {
        let err = RegisteredService::new(" ", AttributeReleasePolicy::ReturnAll).unwrap_err();
        assert!(matches!(err, OAuthAuthnError::InvalidRegisteredService(_)));

        let res: Result<RegisteredService, _> = serde_json::from_str(r#"{"client_id":""}"#);
        assert!(res.is_err());
    }

    #[test]
    fn registered_service_defaults_to_deny_all() {
        let svc: RegisteredService = serde_json::from_str(r#"{"client_id":"client1"}"#).unwrap();
        assert_eq!(svc.release_policy(), &AttributeReleasePolicy::DenyAll);
        assert_eq!(svc.release_protocol_attributes(), None);
        assert_eq!(svc.to_string(), "client1");
    }

    #[test]
    fn registered_service_parses_tagged_policy() {
        let svc: RegisteredService = serde_json::from_str(
            r#"{
                "client_id": "client1",
                "name": "Portal",
                "release_policy": {"type": "return_allowed", "allowed_attributes": ["email"]},
                "release_protocol_attributes": false
            }"#,
        )
        .unwrap();

        assert_eq!(
            svc.release_policy(),
            &AttributeReleasePolicy::ReturnAllowed {
                allowed_attributes: vec!["email".to_owned()]
            }
        );
        assert_eq!(svc.release_protocol_attributes(), Some(false));
        assert_eq!(svc.to_string(), "Portal (client1)");
    }
}
