//! The four standard stages.

use axum::http::{HeaderValue, Method};

use crate::http::request::RequestContext;
use crate::http::response::Reply;
use crate::http::url::{ReconstructedUrl, UrlError};
use crate::pipeline::{Effect, Flow, Outcome, Stage};

/// Rejects everything but `GET`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodCheck;

impl Stage for MethodCheck {
    fn name(&self) -> &'static str {
        "method-check"
    }

    fn inspect(&self, ctx: &RequestContext<'_>) -> Flow {
        if ctx.method != Method::GET {
            return Reply::oops("Only GET method is supported").into();
        }
        Flow::Continue
    }
}

/// Logs method and URL when debug mode is on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLog;

impl Stage for DebugLog {
    fn name(&self) -> &'static str {
        "debug-log"
    }

    fn inspect(&self, ctx: &RequestContext<'_>) -> Flow {
        if ctx.config.debug {
            match ReconstructedUrl::from_request(ctx) {
                Ok(url) => tracing::debug!("{} {}", ctx.method, url),
                Err(e) => tracing::debug!(error = %e, "{} {}", ctx.method, ctx.target),
            }
        }
        Flow::Continue
    }
}

/// Answers requests carrying the halt header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaltCheck;

impl Stage for HaltCheck {
    fn name(&self) -> &'static str {
        "halt-check"
    }

    fn inspect(&self, ctx: &RequestContext<'_>) -> Flow {
        let Some(key) = ctx.halt_key() else {
            return Flow::Continue;
        };

        match ctx.config.halt.as_deref() {
            Some(secret) if secret.as_bytes() == key => {
                tracing::info!("Halt header received with the right key, will shutdown in a second...");
                Flow::Respond(Outcome::with_effect(
                    Reply::ok("Will shutdown in a second..."),
                    Effect::Shutdown {
                        after: ctx.config.halt_delay(),
                    },
                ))
            }
            _ => {
                tracing::warn!("Halt header received with a wrong key");
                Reply::oops("Wrong halting key").into()
            }
        }
    }
}

/// Sends the client to the `www.` variant of its URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redirect;

impl Stage for Redirect {
    fn name(&self) -> &'static str {
        "redirect"
    }

    fn inspect(&self, ctx: &RequestContext<'_>) -> Flow {
        let from = match ReconstructedUrl::from_request(ctx) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(error = %e, target = ctx.target, "Cannot rebuild request URL");
                return Reply::oops(e.to_string()).into();
            }
        };
        let to = from.with_www();

        let location = match HeaderValue::try_from(to.to_string()) {
            Ok(value) => value,
            Err(_) => return Reply::oops(UrlError::InvalidHost.to_string()).into(),
        };

        if ctx.config.verbose || ctx.config.debug {
            tracing::info!("{} -> {}", from, to);
        }
        Reply::redirect(location).into()
    }
}
