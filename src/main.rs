//! apex2www
//!
//! An HTTP(S) server that answers every request for a bare domain with a
//! `303` redirect to the same URL on `www.`.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                       APEX2WWW                        │
//!   Client Request    │  ┌─────────┐   ┌─────────┐   ┌──────────────────────┐ │
//!   ──────────────────┼─▶│   net   │──▶│  http   │──▶│       pipeline       │ │
//!                     │  │listener │   │ server  │   │ method → log → halt  │ │
//!                     │  │  + tls  │   │         │   │       → redirect     │ │
//!                     │  └─────────┘   └─────────┘   └──────────┬───────────┘ │
//!   303 / 400 / 200   │                     ▲                   │             │
//!   ◀─────────────────┼─────────────────────┴───── Outcome ─────┘             │
//!                     │                               │ shutdown effect        │
//!                     │  ┌────────┐ ┌─────────────┐ ┌─▼─────────────────────┐  │
//!                     │  │ config │ │observability│ │      lifecycle        │  │
//!                     │  │ + cli  │ │  (tracing)  │ │ startup / shutdown    │  │
//!                     │  └────────┘ └─────────────┘ └───────────────────────┘  │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use apex2www::cli::Cli;
use apex2www::lifecycle::startup;
use apex2www::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config);
    tracing::debug!(
        port = config.port,
        https = config.https,
        halt_enabled = config.halt.is_some(),
        halt_delay_ms = config.halt_delay_ms,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}
