//! Resolution of the service a client is authenticating against.

use oauth_authn_sdk::{RegisteredService, RequestContext, Service};
use tracing::debug;

use crate::config::OAuthAuthnConfig;

/// Picks the service identifier for a request.
///
/// Order: the service header, then its alias (both only when the caller allows
/// header override), then the registered client identifier. Blank values are
/// treated as absent, so the result is never blank.
pub struct ServiceResolver {
    service_header: String,
    service_header_alias: String,
}

impl ServiceResolver {
    #[must_use]
    pub fn new(service_header: impl Into<String>, service_header_alias: impl Into<String>) -> Self {
        Self {
            service_header: service_header.into(),
            service_header_alias: service_header_alias.into(),
        }
    }

    #[must_use]
    pub fn from_config(cfg: &OAuthAuthnConfig) -> Self {
        Self::new(cfg.service_header.as_str(), cfg.service_header_alias.as_str())
    }

    #[must_use]
    #[tracing::instrument(
        skip_all,
        fields(client_id = %registered_service.client_id(), allow_header_override = allow_header_override)
    )]
    pub fn resolve(
        &self,
        registered_service: &RegisteredService,
        context: &dyn RequestContext,
        allow_header_override: bool,
    ) -> Service {
        let from_header = if allow_header_override {
            self.service_from_headers(context)
        } else {
            None
        };

        match from_header {
            Some(id) => Service::new(id),
            None => Service::new(registered_service.client_id()),
        }
    }

    fn service_from_headers<'a>(&self, context: &'a dyn RequestContext) -> Option<&'a str> {
        let id = non_blank(context.request_header(&self.service_header))
            .or_else(|| non_blank(context.request_header(&self.service_header_alias)));
        debug!(service = ?id, "Located service based on request header");
        id
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use oauth_authn_sdk::{AttributeReleasePolicy, HttpRequestContext};

    fn resolver() -> ServiceResolver {
        ServiceResolver::from_config(&OAuthAuthnConfig::default())
    }

    fn registered() -> RegisteredService {
        RegisteredService::new("client-1", AttributeReleasePolicy::ReturnAll).unwrap()
    }

    fn ctx(headers: &[(&str, &str)]) -> HttpRequestContext {
        let mut map = http::HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                http::HeaderValue::from_str(value).unwrap(),
            );
        }
        HttpRequestContext::new(map, None)
    }

    #[test]
    fn override_disabled_ignores_headers() {
        let service = resolver().resolve(&registered(), &ctx(&[("service", "svc1")]), false);
        assert_eq!(service.id(), "client-1");
    }

    #[test]
    fn primary_header_wins() {
        let context = ctx(&[("service", "svc1"), ("X-service", "svc2")]);
        let service = resolver().resolve(&registered(), &context, true);
        assert_eq!(service.id(), "svc1");
    }

    #[test]
    fn alias_used_when_primary_blank() {
        let context = ctx(&[("service", "  "), ("X-service", "svc2")]);
        let service = resolver().resolve(&registered(), &context, true);
        assert_eq!(service.id(), "svc2");
    }

    #[test]
    fn blank_headers_fall_back_to_client_id() {
        let context = ctx(&[("service", "   "), ("X-service", "")]);
        let service = resolver().resolve(&registered(), &context, true);
        assert_eq!(service.id(), "client-1");
    }

    #[test]
    fn opaque_primary_header_falls_through_to_alias() {
        let mut map = http::HeaderMap::new();
        map.insert("service", http::HeaderValue::from_bytes(b"svc\xff").unwrap());
        map.insert("X-service", http::HeaderValue::from_static("svc2"));
        let context = HttpRequestContext::new(map, None);

        let service = resolver().resolve(&registered(), &context, true);
        assert_eq!(service.id(), "svc2");
    }

    #[test]
    fn custom_header_names() {
        let resolver = ServiceResolver::new("x-target", "x-target-alias");
        let context = ctx(&[("service", "svc1"), ("x-target-alias", "svc3")]);
        let service = resolver.resolve(&registered(), &context, true);
        assert_eq!(service.id(), "svc3");
    }
}
