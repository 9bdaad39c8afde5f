//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the single catch-all handler
//! - Wire up middleware (tracing)
//! - Serve over a plain or TLS listener
//! - Stop serving when the shutdown broadcast fires

use std::future::IntoFuture;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::http::request::RequestContext;
use crate::lifecycle::Shutdown;
use crate::net::{Listener, ListenerError};
use crate::pipeline::{Outcome, Pipeline};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<Pipeline>,
    pub shutdown: Shutdown,
}

/// The redirecting HTTP(S) server.
pub struct RedirectServer {
    state: AppState,
}

impl RedirectServer {
    /// Create a server running the standard pipeline.
    pub fn new(config: Config, shutdown: Shutdown) -> Self {
        Self::with_pipeline(config, Pipeline::standard(), shutdown)
    }

    pub fn with_pipeline(config: Config, pipeline: Pipeline, shutdown: Shutdown) -> Self {
        Self {
            state: AppState {
                config: Arc::new(config),
                pipeline: Arc::new(pipeline),
                shutdown,
            },
        }
    }

    /// Build the Axum router; every method and path reaches the pipeline.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(redirect_handler)
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve plain HTTP until shutdown is triggered.
    pub async fn serve(self, listener: Listener) -> Result<(), ServeError> {
        let mut halted = self.state.shutdown.subscribe();
        let app = self.router();

        tokio::select! {
            result = axum::serve(listener.into_tokio(), app).into_future() => result?,
            _ = halted.recv() => {}
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS until shutdown is triggered.
    pub async fn serve_tls(self, listener: Listener, tls: RustlsConfig) -> Result<(), ServeError> {
        let handle = axum_server::Handle::new();
        let mut halted = self.state.shutdown.subscribe();
        let stopper = handle.clone();
        tokio::spawn(async move {
            let _ = halted.recv().await;
            stopper.shutdown();
        });

        let app = self.router();
        axum_server::from_tcp_rustls(listener.into_std()?, tls)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Failure while serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the pipeline for one request and applies its effect.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let ctx = RequestContext::from_parts(&parts, &state.config);

    let Outcome { reply, effect } = state.pipeline.run(&ctx);
    // The grace timer starts when this handler returns, not once hyper has
    // finished writing the response.
    if let Some(effect) = effect {
        state.shutdown.apply(effect);
    }
    reply.into_response()
}
