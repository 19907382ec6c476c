//! Request-scoped lookups used while resolving the service and assembling the
//! authentication.

use http::HeaderMap;
use http::request::Parts;

/// Read-only view of the current request.
pub trait RequestContext {
    /// Header value by name. Values that are not valid visible ASCII are
    /// reported as absent.
    fn request_header(&self, name: &str) -> Option<&str>;

    /// First value of a query or form parameter by name.
    fn request_parameter(&self, name: &str) -> Option<&str>;
}

/// [`RequestContext`] over `http` request parts.
#[derive(Debug, Clone, Default)]
pub struct HttpRequestContext {
    headers: HeaderMap,
    parameters: Vec<(String, String)>,
}

impl HttpRequestContext {
    /// Build from headers and an optional raw query string.
    #[must_use]
    pub fn new(headers: HeaderMap, query: Option<&str>) -> Self {
        let parameters = query
            .map(|q| parse_urlencoded(q.as_bytes()))
            .unwrap_or_default();
        Self {
            headers,
            parameters,
        }
    }

    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(parts.headers.clone(), parts.uri.query())
    }

    /// Append parameters from an `application/x-www-form-urlencoded` body.
    /// Query parameters keep precedence.
    #[must_use]
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.parameters.extend(parse_urlencoded(body));
        self
    }
}

impl RequestContext for HttpRequestContext {
    fn request_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn request_parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_urlencoded(input: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(input).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring unparseable request parameters");
        Vec::new()
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::{HeaderValue, Request};

    fn parts(uri: &str) -> Parts {
        Request::builder()
            .uri(uri)
            .header("Service", "https://app.example.org")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let ctx = HttpRequestContext::from_parts(&parts("/oauth2.0/callback"));
        assert_eq!(ctx.request_header("service"), Some("https://app.example.org"));
        assert_eq!(ctx.request_header("SERVICE"), Some("https://app.example.org"));
        assert_eq!(ctx.request_header("X-service"), None);
    }

    #[test]
    fn opaque_header_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("service", HeaderValue::from_bytes(b"caf\xe9").unwrap());
        let ctx = HttpRequestContext::new(headers, None);
        assert_eq!(ctx.request_header("service"), None);
    }

    #[test]
    fn invalid_header_name_is_absent() {
        let ctx = HttpRequestContext::default();
        assert_eq!(ctx.request_header("not a header"), None);
    }

    #[test]
    fn query_parameters_are_decoded() {
        let ctx = HttpRequestContext::from_parts(&parts("/cb?state=abc%20123&nonce=n-1&state=second"));
        assert_eq!(ctx.request_parameter("state"), Some("abc 123"));
        assert_eq!(ctx.request_parameter("nonce"), Some("n-1"));
        assert_eq!(ctx.request_parameter("scope"), None);
    }

    #[test]
    fn form_body_adds_parameters_after_query() {
        let ctx = HttpRequestContext::from_parts(&parts("/cb?state=from-query"))
            .with_form_body(b"state=from-body&scope=openid+email");
        assert_eq!(ctx.request_parameter("state"), Some("from-query"));
        assert_eq!(ctx.request_parameter("scope"), Some("openid email"));
    }
}
