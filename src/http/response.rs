//! Plain-text responses with the fixed header set.
//!
//! Every response carries `Content-Type: text/plain`, an exact
//! `Content-Length` and the `X-Apex2www-Version` header. The body is
//! written in one piece together with the headers.

use std::borrow::Cow;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use hyper::ext::ReasonPhrase;

/// Header announcing the running version.
pub const X_APEX2WWW_VERSION: HeaderName = HeaderName::from_static("x-apex2www-version");

/// Version advertised in [`X_APEX2WWW_VERSION`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A terminal response produced by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    status: StatusCode,
    body: Cow<'static, str>,
    location: Option<HeaderValue>,
}

impl Reply {
    /// `200 OK` with a text body.
    pub fn ok(body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            location: None,
        }
    }

    /// `400 Error` with a text body.
    pub fn oops(body: impl Into<Cow<'static, str>>) -> Self {
        Self::failure(StatusCode::BAD_REQUEST, body)
    }

    /// Any error status with a text body.
    pub fn failure(status: StatusCode, body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            body: body.into(),
            location: None,
        }
    }

    /// `303 Redirect` to `location` with an empty body.
    pub fn redirect(location: HeaderValue) -> Self {
        Self {
            status: StatusCode::SEE_OTHER,
            body: Cow::Borrowed(""),
            location: Some(location),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn location(&self) -> Option<&HeaderValue> {
        self.location.as_ref()
    }

    fn reason(&self) -> &'static [u8] {
        match self.status {
            StatusCode::OK => b"OK",
            StatusCode::SEE_OTHER => b"Redirect",
            _ => b"Error",
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let reason = ReasonPhrase::from_static(self.reason());
        let length = HeaderValue::from(self.body.len());

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(header::CONTENT_LENGTH, length);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        if let Some(location) = self.location {
            headers.insert(header::LOCATION, location);
        }
        headers.insert(X_APEX2WWW_VERSION, HeaderValue::from_static(VERSION));

        response.extensions_mut().insert(reason);
        response
    }
}
