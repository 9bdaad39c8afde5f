//! Startup orchestration.
//!
//! # Responsibilities
//! - Load TLS material when HTTPS is configured
//! - Bind the listener and begin accepting traffic
//! - Return once shutdown has been triggered
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Certificates are read before binding, so a bad path never opens a port

use thiserror::Error;

use crate::config::Config;
use crate::http::{RedirectServer, ServeError};
use crate::lifecycle::{signals, Shutdown};
use crate::net::{Listener, ListenerError, SecureContext, TlsError};

/// Fatal error before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error(transparent)]
    Serve(#[from] ServeError),
}

/// Serve until a halt request or Ctrl-C.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    tokio::spawn(signals::ctrl_c(shutdown.clone()));
    run_with(config, shutdown).await
}

/// Serve with an externally owned shutdown coordinator.
pub async fn run_with(config: Config, shutdown: Shutdown) -> Result<(), StartupError> {
    let port = config.port;

    if config.https {
        let context = SecureContext::load(&config.tls).await?;
        let tls = context.rustls_config()?;
        let listener = Listener::bind(port).await?;
        tracing::info!(
            "HTTPS server started at port {} (key.length={}, cert.length={}), hit Ctrl-C to stop it",
            port,
            context.key_len(),
            context.cert_len()
        );
        RedirectServer::new(config, shutdown).serve_tls(listener, tls).await?;
    } else {
        let listener = Listener::bind(port).await?;
        tracing::info!("HTTP server started at port {}, hit Ctrl-C to stop it", port);
        RedirectServer::new(config, shutdown).serve(listener).await?;
    }

    Ok(())
}
