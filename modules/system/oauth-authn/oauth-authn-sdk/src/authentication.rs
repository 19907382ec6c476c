//! Output models: the filtered principal and the assembled authentication.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AttributeValue, Attributes};

/// Policy-approved internal identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    #[serde(default)]
    attributes: Attributes,
}

impl Principal {
    #[must_use]
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Audit reference to the credential that was used. Carries the external
/// identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMetaData {
    id: String,
}

impl CredentialMetaData {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Successful outcome of one authentication mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResult {
    handler_name: String,
    credential: CredentialMetaData,
    principal: Principal,
    warnings: Vec<String>,
}

impl HandlerResult {
    #[must_use]
    pub fn new(
        handler_name: impl Into<String>,
        credential: CredentialMetaData,
        principal: Principal,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            handler_name: handler_name.into(),
            credential,
            principal,
            warnings,
        }
    }

    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    #[must_use]
    pub fn credential(&self) -> &CredentialMetaData {
        &self.credential
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Finalized authentication record handed to session/ticket issuance.
///
/// The attribute map always contains every principal attribute with the
/// principal's value; [`AuthenticationBuilder::build`] enforces this.
///
/// # Security
///
/// A release policy that puts a `state` or `nonce` attribute on the principal
/// replaces the request value of the same name here. Validate the `state`
/// replay token against the request itself, not against
/// [`Self::attribute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    principal: Principal,
    credentials: Vec<CredentialMetaData>,
    successes: BTreeMap<String, HandlerResult>,
    authentication_date: DateTime<Utc>,
    attributes: Attributes,
}

impl Authentication {
    #[must_use]
    pub fn builder(principal: Principal, authentication_date: DateTime<Utc>) -> AuthenticationBuilder {
        AuthenticationBuilder {
            principal,
            credentials: Vec::new(),
            successes: BTreeMap::new(),
            authentication_date,
            attributes: Attributes::new(),
        }
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn credentials(&self) -> &[CredentialMetaData] {
        &self.credentials
    }

    /// Successful handler results keyed by mechanism name.
    #[must_use]
    pub fn successes(&self) -> &BTreeMap<String, HandlerResult> {
        &self.successes
    }

    #[must_use]
    pub fn authentication_date(&self) -> DateTime<Utc> {
        self.authentication_date
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

pub struct AuthenticationBuilder {
    principal: Principal,
    credentials: Vec<CredentialMetaData>,
    successes: BTreeMap<String, HandlerResult>,
    authentication_date: DateTime<Utc>,
    attributes: Attributes,
}

impl AuthenticationBuilder {
    /// Set an authentication attribute, replacing any previous value.
    #[must_use]
    pub fn add_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn add_credential(mut self, credential: CredentialMetaData) -> Self {
        self.credentials.push(credential);
        self
    }

    #[must_use]
    pub fn add_success(mut self, handler_name: impl Into<String>, result: HandlerResult) -> Self {
        self.successes.insert(handler_name.into(), result);
        self
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Finish the record. Principal attributes are copied over the
    /// authentication attributes so the two maps never disagree.
    #[must_use]
    pub fn build(self) -> Authentication {
        let mut attributes = self.attributes;
        for (name, value) in self.principal.attributes() {
            if let Some(previous) = attributes.insert(name.clone(), value.clone())
                && &previous != value
            {
                tracing::warn!(
                    attribute = %name,
                    principal = %self.principal.id(),
                    "Authentication attribute replaced by principal attribute of the same name"
                );
            }
        }

        Authentication {
            principal: self.principal,
            credentials: self.credentials,
            successes: self.successes,
            authentication_date: self.authentication_date,
            attributes,
        }
    }
}
