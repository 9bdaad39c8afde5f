//! Per-request context handed to every pipeline stage.
//!
//! # Responsibilities
//! - Borrow the parts of the inbound request the stages inspect
//! - Carry the process configuration alongside them
//!
//! # Design Decisions
//! - Borrowed, never cloned: a context lives only as long as its request
//! - Bodies are ignored; only GET is served

use axum::http::{request::Parts, HeaderMap, HeaderName, Method};

use crate::config::Config;

/// Header carrying the shared halt secret.
pub const X_APEX2WWW_HALT: HeaderName = HeaderName::from_static("x-apex2www-halt");

/// Everything a stage may look at for one request.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub headers: &'a HeaderMap,
    /// Raw path and query as received.
    pub target: &'a str,
    pub config: &'a Config,
}

impl<'a> RequestContext<'a> {
    /// Build a context from decoded request parts.
    pub fn from_parts(parts: &'a Parts, config: &'a Config) -> Self {
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        Self {
            method: &parts.method,
            headers: &parts.headers,
            target,
            config,
        }
    }

    /// Raw value of the halt header, if the client sent one.
    pub fn halt_key(&self) -> Option<&'a [u8]> {
        self.headers.get(&X_APEX2WWW_HALT).map(|v| v.as_bytes())
    }
}
