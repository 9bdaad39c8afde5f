//! Request pipeline.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → MethodCheck   (400 unless GET)
//!     → DebugLog      (never responds)
//!     → HaltCheck     (400 wrong key, 200 + shutdown effect on right key)
//!     → Redirect      (303 to the www. URL, always responds)
//!     → Outcome { reply, effect }
//! ```
//!
//! # Design Decisions
//! - The stage list is built once and never mutated; it is shared by `Arc`
//! - A stage either continues or returns the single outcome of the request,
//!   so no stage can write twice and nothing runs after a response
//! - Side effects (shutdown) are returned as data and executed by the caller

pub mod stages;

use std::time::Duration;

use axum::http::StatusCode;

use crate::http::request::RequestContext;
use crate::http::response::Reply;

pub use stages::{DebugLog, HaltCheck, MethodCheck, Redirect};

/// Work the caller must perform after sending the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Terminate the process once `after` has elapsed.
    Shutdown { after: Duration },
}

/// The terminal result of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    pub effect: Option<Effect>,
}

impl Outcome {
    pub fn with_effect(reply: Reply, effect: Effect) -> Self {
        Self {
            reply,
            effect: Some(effect),
        }
    }
}

impl From<Reply> for Outcome {
    fn from(reply: Reply) -> Self {
        Self {
            reply,
            effect: None,
        }
    }
}

/// What a stage decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Hand the request to the next stage.
    Continue,
    /// Stop here; this is the request's response.
    Respond(Outcome),
}

impl From<Reply> for Flow {
    fn from(reply: Reply) -> Self {
        Flow::Respond(reply.into())
    }
}

/// One step of the pipeline.
pub trait Stage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn inspect(&self, ctx: &RequestContext<'_>) -> Flow;
}

/// Ordered, immutable list of stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Method check, debug logging, halt check, redirect.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MethodCheck),
            Box::new(DebugLog),
            Box::new(HaltCheck),
            Box::new(Redirect),
        ])
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run stages in order until one responds.
    pub fn run(&self, ctx: &RequestContext<'_>) -> Outcome {
        for stage in &self.stages {
            if let Flow::Respond(outcome) = stage.inspect(ctx) {
                tracing::trace!(
                    stage = stage.name(),
                    status = outcome.reply.status().as_u16(),
                    "Pipeline stopped"
                );
                return outcome;
            }
        }

        tracing::error!(
            method = %ctx.method,
            target = ctx.target,
            "No pipeline stage produced a response"
        );
        Reply::failure(StatusCode::INTERNAL_SERVER_ERROR, "No response").into()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls and either continues or answers with `reply`.
    struct CountingStage {
        calls: Arc<AtomicUsize>,
        reply: Option<Reply>,
    }

    impl Stage for CountingStage {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn inspect(&self, _ctx: &RequestContext<'_>) -> Flow {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => reply.clone().into(),
                None => Flow::Continue,
            }
        }
    }

    fn counting(reply: Option<Reply>) -> (Box<dyn Stage>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = CountingStage {
            calls: Arc::clone(&calls),
            reply,
        };
        (Box::new(stage), calls)
    }

    fn run(pipeline: &Pipeline) -> Outcome {
        let (parts, _) = Request::get("/").body(()).unwrap().into_parts();
        let config = Config::default();
        pipeline.run(&RequestContext::from_parts(&parts, &config))
    }

    #[test]
    fn stops_at_first_response() {
        let (first, first_calls) = counting(None);
        let (second, second_calls) = counting(Some(Reply::ok("second")));
        let (third, third_calls) = counting(Some(Reply::ok("third")));
        let pipeline = Pipeline::new(vec![first, second, third]);

        let outcome = run(&pipeline);
        assert_eq!(outcome.reply.body(), "second");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exhausted_pipeline_answers_500() {
        let (only, _) = counting(None);
        let outcome = run(&Pipeline::new(vec![only]));
        assert_eq!(outcome.reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(outcome.effect, None);
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            Pipeline::standard().stage_names(),
            vec!["method-check", "debug-log", "halt-check", "redirect"]
        );
    }
}
