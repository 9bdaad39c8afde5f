//! OS signal handling.
//!
//! # Responsibilities
//! - Register the Ctrl-C handler
//! - Translate it into the same shutdown path a halt request uses

use crate::lifecycle::Shutdown;

/// Wait for Ctrl-C, then trigger shutdown.
pub async fn ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl-C handler"),
    }
}
