//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the default level from `--debug`
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the command line when set
//! - `--verbose` does not change the level: redirect lines are logged at info

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(config: &Config) -> &'static str {
    if config.debug {
        "apex2www=debug,tower_http=debug"
    } else {
        "apex2www=info"
    }
}

/// Install the global subscriber.
pub fn init(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(config).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
