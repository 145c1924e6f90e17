//! Upstream target resolution.

use std::collections::HashMap;

use crate::config::ProxyConfig;
use crate::proxy::ProxyError;

/// Per-call overrides parsed from the proxy request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequest {
    pub host: Option<String>,
    pub path: Option<String>,
}

impl ProxyRequest {
    /// Parse a body of the form `{"host": "...", "path": "..."}`.
    ///
    /// An empty (or whitespace-only) body is the same as `{}`. Unknown keys
    /// are ignored; non-string values are rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, ProxyError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let mut fields: HashMap<String, String> =
            serde_json::from_slice(body).map_err(ProxyError::MalformedBody)?;

        Ok(Self {
            host: fields.remove("host"),
            path: fields.remove("path"),
        })
    }

    /// Build the upstream URL, substituting configured defaults for empty fields.
    pub fn target_url(&self, defaults: &ProxyConfig) -> String {
        let host = non_empty(&self.host).unwrap_or(&defaults.default_host);
        let path = non_empty(&self.path).unwrap_or(&defaults.default_path);
        join_url(host, path)
    }
}

fn non_empty(field: &Option<String>) -> Option<&String> {
    field.as_ref().filter(|value| !value.is_empty())
}

/// Join `host` and `path` with a single slash.
///
/// Exactly one trailing slash is trimmed from the host and exactly one
/// leading slash from the path.
pub fn join_url(host: &str, path: &str) -> String {
    let host = host.strip_suffix('/').unwrap_or(host);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{host}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ProxyConfig {
        ProxyConfig {
            default_host: "http://upstream.local/".into(),
            default_path: "/get?x=1".into(),
            request_timeout_seconds: 1,
        }
    }

    #[test]
    fn joins_with_single_slash() {
        assert_eq!(join_url("http://a", "b"), "http://a/b");
        assert_eq!(join_url("http://a/", "b"), "http://a/b");
        assert_eq!(join_url("http://a", "/b"), "http://a/b");
        assert_eq!(join_url("http://a/", "/b"), "http://a/b");
        assert_eq!(join_url("http://a", ""), "http://a/");
    }

    #[test]
    fn trims_only_one_slash_each_side() {
        assert_eq!(join_url("http://a//", "//b"), "http://a///b");
    }

    #[test]
    fn empty_body_uses_defaults() {
        let request = ProxyRequest::from_body(b"").unwrap();
        assert_eq!(request, ProxyRequest::default());
        assert_eq!(request.target_url(&defaults()), "http://upstream.local/get?x=1");

        let request = ProxyRequest::from_body(b"{}").unwrap();
        assert_eq!(request.target_url(&defaults()), "http://upstream.local/get?x=1");
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let request =
            ProxyRequest::from_body(br#"{"host":"http://example.com","path":"foo"}"#).unwrap();
        assert_eq!(request.target_url(&defaults()), "http://example.com/foo");
    }

    #[test]
    fn empty_strings_fall_back_independently() {
        let request = ProxyRequest::from_body(br#"{"host":"","path":"only/path"}"#).unwrap();
        assert_eq!(request.target_url(&defaults()), "http://upstream.local/only/path");

        let request = ProxyRequest::from_body(br#"{"host":"http://h"}"#).unwrap();
        assert_eq!(request.target_url(&defaults()), "http://h/get?x=1");
    }

    #[test]
    fn malformed_body_keeps_parser_message() {
        let err = ProxyRequest::from_body(b"{\"host\": 42}").unwrap_err();
        assert!(matches!(err, ProxyError::MalformedBody(_)));
        assert!(err.to_string().contains("invalid type"));

        assert!(ProxyRequest::from_body(b"not json").is_err());
    }
}
