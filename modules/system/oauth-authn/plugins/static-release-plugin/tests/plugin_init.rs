#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Plugin configuration and initialization.

use oauth_authn_sdk::{
    AttributeReleasePolicy, AttributeValue, Attributes, HttpRequestContext, Principal,
    RegisteredService, Service,
};
use static_release_plugin::StaticReleasePlugin;
use static_release_plugin::config::{ReleaseMode, StaticReleasePluginConfig};

#[test]
fn config_defaults_to_service_policy_with_standard_scopes() {
    let cfg: StaticReleasePluginConfig = serde_json::from_value(serde_json::json!({})).unwrap();

    assert_eq!(cfg.mode, ReleaseMode::ServicePolicy);
    assert_eq!(
        cfg.scope_claims.get("email"),
        Some(&vec!["email".to_owned(), "email_verified".to_owned()])
    );
    assert!(cfg.scope_claims.contains_key("profile"));
}

#[test]
fn config_rejects_unknown_fields() {
    let res: Result<StaticReleasePluginConfig, _> =
        serde_json::from_value(serde_json::json!({ "mode": "release_all", "vendor": "x" }));
    assert!(res.is_err());
}

#[test]
fn custom_scope_table_drives_release() {
    let cfg: StaticReleasePluginConfig = serde_json::from_value(serde_json::json!({
        "mode": "oidc_scopes",
        "scope_claims": { "directory": ["groups"] }
    }))
    .unwrap();

    let plugin = StaticReleasePlugin::default();
    let filter = plugin.init(&cfg).unwrap();

    let attributes: Attributes = [
        ("groups".to_owned(), AttributeValue::from("admins")),
        ("email".to_owned(), AttributeValue::from("a@x.com")),
    ]
    .into_iter()
    .collect();
    let registered = RegisteredService::new("client-1", AttributeReleasePolicy::ReturnAll).unwrap();
    let ctx = HttpRequestContext::new(http::HeaderMap::new(), Some("scope=openid+directory+email"));

    let principal = filter
        .filter(
            &Service::new("client-1"),
            Principal::new("casuser", attributes),
            &registered,
            &ctx,
        )
        .unwrap();

    let keys: Vec<&str> = principal.attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["groups"]);
}

#[test]
fn init_twice_fails() {
    let plugin = StaticReleasePlugin::default();
    let cfg = StaticReleasePluginConfig::default();

    assert!(plugin.init(&cfg).is_ok());
    assert!(plugin.init(&cfg).is_err());
}
