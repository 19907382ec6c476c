//! Configuration for the static attribute release plugin.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticReleasePluginConfig {
    /// Release mode.
    pub mode: ReleaseMode,

    /// Claims granted by each scope in `oidc_scopes` mode.
    pub scope_claims: BTreeMap<String, Vec<String>>,
}

impl Default for StaticReleasePluginConfig {
    fn default() -> Self {
        Self {
            mode: ReleaseMode::ServicePolicy,
            scope_claims: standard_scope_claims(),
        }
    }
}

/// Release mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMode {
    /// Apply the registered service's release policy.
    #[default]
    ServicePolicy,
    /// Release every attribute regardless of policy.
    ReleaseAll,
    /// Apply the service policy, then restrict to claims of the requested scopes.
    OidcScopes,
}

/// `OpenID` Connect Core 1.0 section 5.4 scope claims.
fn standard_scope_claims() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 4] = [
        (
            "profile",
            &[
                "name",
                "family_name",
                "given_name",
                "middle_name",
                "nickname",
                "preferred_username",
                "profile",
                "picture",
                "website",
                "gender",
                "birthdate",
                "zoneinfo",
                "locale",
                "updated_at",
            ],
        ),
        ("email", &["email", "email_verified"]),
        ("address", &["address"]),
        ("phone", &["phone_number", "phone_number_verified"]),
    ];

    table
        .iter()
        .map(|(scope, claims)| {
            (
                (*scope).to_owned(),
                claims.iter().map(|c| (*c).to_owned()).collect(),
            )
        })
        .collect()
}
