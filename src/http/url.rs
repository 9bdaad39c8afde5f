//! Reconstruction of the URL a client asked for, and of its `www.` twin.
//!
//! The scheme always comes from configuration, not from the transport the
//! request arrived on. A deployment behind a TLS-terminating proxy sets
//! `https` so redirects keep the public scheme.

use std::fmt;

use axum::http::header::HOST;
use thiserror::Error;

use crate::http::request::RequestContext;

const WWW_PREFIX: &str = "www.";

/// Failure to reconstruct a URL from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Host header required")]
    MissingHost,

    #[error("Malformed Host header")]
    InvalidHost,
}

/// Public scheme of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// An absolute URL rebuilt from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedUrl {
    pub scheme: Scheme,
    pub hostname: String,
    /// Path and query exactly as received.
    pub target: String,
}

impl ReconstructedUrl {
    /// Rebuild the URL the client requested.
    pub fn from_request(ctx: &RequestContext<'_>) -> Result<Self, UrlError> {
        let host = ctx
            .headers
            .get(HOST)
            .ok_or(UrlError::MissingHost)?
            .to_str()
            .map_err(|_| UrlError::InvalidHost)?;

        let hostname = strip_port(host).trim();
        if hostname.is_empty() {
            return Err(UrlError::MissingHost);
        }

        let scheme = if ctx.config.https {
            Scheme::Https
        } else {
            Scheme::Http
        };

        Ok(Self {
            scheme,
            hostname: hostname.to_string(),
            target: ctx.target.to_string(),
        })
    }

    /// The same URL with `www.` in front of the hostname.
    ///
    /// The prefix test is a literal, case-sensitive match: `WWW.example.com`
    /// becomes `www.WWW.example.com`.
    pub fn with_www(&self) -> Self {
        let mut url = self.clone();
        if !url.hostname.starts_with(WWW_PREFIX) {
            url.hostname.insert_str(0, WWW_PREFIX);
        }
        url
    }
}

impl fmt::Display for ReconstructedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme.as_str(), self.hostname, self.target)
    }
}

/// Drop a trailing `:<digits>` from a Host header value.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::Request;

    fn url_for(host: Option<&str>, target: &str, https: bool) -> Result<ReconstructedUrl, UrlError> {
        let mut builder = Request::get(target);
        if let Some(host) = host {
            builder = builder.header(HOST, host);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        let config = Config {
            https,
            ..Config::default()
        };
        ReconstructedUrl::from_request(&RequestContext::from_parts(&parts, &config))
    }

    #[test]
    fn strips_numeric_port_only() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("example.com:"), "example.com:");
        assert_eq!(strip_port("example.com:http"), "example.com:http");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }

    #[test]
    fn rebuilds_original_url() {
        let url = url_for(Some("example.com:8080"), "/a/b?x=1", false).unwrap();
        assert_eq!(url.to_string(), "http://example.com/a/b?x=1");
        assert_eq!(url.scheme, Scheme::Http);
    }

    #[test]
    fn scheme_follows_configuration() {
        let url = url_for(Some("example.com"), "/", true).unwrap();
        assert_eq!(url.with_www().to_string(), "https://www.example.com/");
        assert_eq!(url.scheme, Scheme::Https);
    }

    #[test]
    fn prefixes_www_once() {
        let url = url_for(Some("example.com"), "/", false).unwrap();
        let redirect = url.with_www();
        assert_eq!(redirect.hostname, "www.example.com");
        assert_eq!(redirect.with_www(), redirect);
    }

    #[test]
    fn uppercase_www_gets_prefixed_again() {
        let url = url_for(Some("WWW.example.com"), "/", false).unwrap();
        assert_eq!(url.with_www().hostname, "www.WWW.example.com");
    }

    #[test]
    fn query_is_not_normalized() {
        let url = url_for(Some("example.com"), "/%7Euser/../x?b=2&a=1&&", false).unwrap();
        assert_eq!(
            url.with_www().to_string(),
            "http://www.example.com/%7Euser/../x?b=2&a=1&&"
        );
    }

    #[test]
    fn redirect_is_idempotent() {
        let url = url_for(Some("example.com"), "/p?q=1", false).unwrap();
        assert_eq!(url.with_www(), url.with_www());
        assert_eq!(url.hostname, "example.com");
    }

    #[test]
    fn missing_host_is_an_error() {
        assert_eq!(url_for(None, "/", false), Err(UrlError::MissingHost));
    }

    #[test]
    fn empty_hostname_counts_as_missing() {
        for host in ["", ":8080", " ", " :80"] {
            assert_eq!(
                url_for(Some(host), "/", false),
                Err(UrlError::MissingHost),
                "host {host:?}"
            );
        }
    }

    #[test]
    fn non_ascii_host_is_an_error() {
        let (mut parts, _) = Request::get("/").body(()).unwrap().into_parts();
        parts.headers.insert(
            HOST,
            axum::http::HeaderValue::from_bytes(b"caf\xe9.example").unwrap(),
        );
        let config = Config::default();
        let ctx = RequestContext::from_parts(&parts, &config);
        assert_eq!(ReconstructedUrl::from_request(&ctx), Err(UrlError::InvalidHost));
    }
}
